//! Errors from talking to the HikeMeet backend

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Backend answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Config error: {0}")]
    Config(String),
}

impl ApiError {
    /// Status code for `Status` errors
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let error = ApiError::Status {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert_eq!(error.to_string(), "HTTP 401: Unauthorized");
        assert_eq!(error.status(), Some(401));
        assert_eq!(ApiError::Config("x".into()).status(), None);
    }

    #[test]
    fn test_from_serde_error() {
        let serde_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let error: ApiError = serde_error.into();
        assert!(error.to_string().starts_with("Serialization error"));
    }
}
