//! REST client for the HikeMeet backend

use super::error::ApiError;
use crate::config::HikeConfig;
use crate::models::{CombinedResponse, Group, GroupsResponse, Trip, TripsResponse, User, UsersResponse};
use crate::search::aggregate::{ResultKind, ResultSet};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::Url;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Where search screens get their collections from
///
/// Implemented by [`ApiClient`]; tests substitute an in-memory source.
pub trait SearchSource {
    /// Every group (`GET /api/group/list`)
    fn list_groups(&self) -> impl Future<Output = Result<Vec<Group>, ApiError>> + Send;

    /// Every trip (`GET /api/trip/list`)
    fn list_trips(&self) -> impl Future<Output = Result<Vec<Trip>, ApiError>> + Send;

    /// Results for `query` restricted to `kind`; other kinds stay empty
    fn search(
        &self,
        kind: ResultKind,
        query: &str,
    ) -> impl Future<Output = Result<ResultSet, ApiError>> + Send;
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl ApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL does not parse or the auth
    /// token is not a valid header value, and `ApiError::Http` if the HTTP
    /// client cannot be constructed.
    pub fn new(config: &HikeConfig) -> Result<Self, ApiError> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("invalid api_base_url '{base_url}': {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url,
            auth_header: build_auth_headers(config.auth_token.as_deref())?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, ApiError> {
        self.get_json::<Vec<Group>, ()>("/api/group/list", None).await
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, ApiError> {
        self.get_json::<Vec<Trip>, ()>("/api/trip/list", None).await
    }

    pub async fn search_groups(&self, query: &str) -> Result<Vec<Group>, ApiError> {
        let body: GroupsResponse = self
            .get_json("/api/search/groups", Some(&[("query", query)]))
            .await?;
        Ok(body.groups)
    }

    pub async fn search_trips(&self, query: &str) -> Result<Vec<Trip>, ApiError> {
        let body: TripsResponse = self
            .get_json("/api/search/trips", Some(&[("query", query)]))
            .await?;
        Ok(body.trips)
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>, ApiError> {
        let body: UsersResponse = self
            .get_json("/api/search/users", Some(&[("query", query)]))
            .await?;
        Ok(body.friends)
    }

    pub async fn search_all(&self, query: &str) -> Result<ResultSet, ApiError> {
        let body: CombinedResponse = self
            .get_json("/api/search/all", Some(&[("query", query)]))
            .await?;
        Ok(ResultSet {
            people: body.friends,
            groups: body.groups,
            trips: body.trips,
        })
    }

    /// Dispatch to the endpoint serving `kind`
    pub async fn search(&self, kind: ResultKind, query: &str) -> Result<ResultSet, ApiError> {
        let results = match kind {
            ResultKind::All => self.search_all(query).await?,
            ResultKind::People => ResultSet {
                people: self.search_users(query).await?,
                ..Default::default()
            },
            ResultKind::Groups => ResultSet {
                groups: self.search_groups(query).await?,
                ..Default::default()
            },
            ResultKind::Trips => ResultSet {
                trips: self.search_trips(query).await?,
                ..Default::default()
            },
        };
        debug!(%kind, query, count = results.len(), "search completed");
        Ok(results)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!(%url, "GET");
        let mut request = self.client.get(url).headers(self.auth_header.clone());
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        parse_response(response).await
    }
}

impl SearchSource for ApiClient {
    fn list_groups(&self) -> impl Future<Output = Result<Vec<Group>, ApiError>> + Send {
        ApiClient::list_groups(self)
    }

    fn list_trips(&self) -> impl Future<Output = Result<Vec<Trip>, ApiError>> + Send {
        ApiClient::list_trips(self)
    }

    fn search(
        &self,
        kind: ResultKind,
        query: &str,
    ) -> impl Future<Output = Result<ResultSet, ApiError>> + Send {
        ApiClient::search(self, kind, query)
    }
}

/// Error body shapes the backend uses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;
    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

/// Pull a readable message out of an error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| body.to_string())
}

fn build_auth_headers(token: Option<&str>) -> Result<HeaderMap, ApiError> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ApiError::Config(format!("invalid auth token: {e}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = HikeConfig {
            api_base_url: "http://localhost:5000/".into(),
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/api/group/list"), "http://localhost:5000/api/group/list");
    }

    #[test]
    fn test_new_rejects_bad_url() {
        let config = HikeConfig {
            api_base_url: "not a url".into(),
            ..Default::default()
        };
        assert!(matches!(ApiClient::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_auth_header() {
        let headers = build_auth_headers(Some("abc123")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc123");

        assert!(build_auth_headers(None).unwrap().is_empty());
        assert!(build_auth_headers(Some("  ")).unwrap().is_empty());
        assert!(build_auth_headers(Some("bad\ntoken")).is_err());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#"{"error":"Group not found"}"#), "Group not found");
        assert_eq!(error_message(r#"{"message":"Token expired"}"#), "Token expired");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
