//! Backend resource shapes
//!
//! Groups, trips and users as the HikeMeet backend returns them. The crate only
//! reads these records; every field a filter looks at is optional so that a
//! partially-populated document deserializes and simply fails the predicate
//! that needs the missing field.

use serde::{Deserialize, Serialize};

/// Geographic location attached to a trip
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// Free-form street/place address
    #[serde(default)]
    pub address: Option<String>,

    /// `[longitude, latitude]` when the backend geocoded the address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<f64>>,
}

/// A hiking group
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// `beginner`, `intermediate`, `advanced`, `hardcore`
    #[serde(default)]
    pub difficulty: Option<String>,

    /// `planned`, `active`, `completed`
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub max_members: Option<i64>,

    #[serde(default)]
    pub scheduled_start: Option<String>,

    #[serde(default)]
    pub scheduled_end: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A trip (a place people hike to)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub location: Option<Location>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Trip {
    /// Address of the trip's location, if it has one
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.location.as_ref().and_then(|l| l.address.as_deref())
    }
}

/// A HikeMeet user ("hiker")
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,
}

impl User {
    /// "First Last" when available, otherwise the username
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self.username.clone(),
        }
    }
}

/// Body of `GET /api/search/groups`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupsResponse {
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Body of `GET /api/search/trips`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripsResponse {
    #[serde(default)]
    pub trips: Vec<Trip>,
}

/// Body of `GET /api/search/users`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub friends: Vec<User>,
}

/// Body of `GET /api/search/all`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CombinedResponse {
    #[serde(default)]
    pub friends: Vec<User>,
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_tolerates_missing_fields() {
        let group: Group = serde_json::from_str(r#"{"_id":"g1"}"#).unwrap();
        assert_eq!(group.id, "g1");
        assert!(group.difficulty.is_none());
        assert!(group.max_members.is_none());
    }

    #[test]
    fn test_trip_address() {
        let trip: Trip = serde_json::from_str(
            r#"{"_id":"t1","name":"Arbel","location":{"address":"Arbel, Israel"},"tags":["Hiking"]}"#,
        )
        .unwrap();
        assert_eq!(trip.address(), Some("Arbel, Israel"));
        assert_eq!(trip.tags, vec!["Hiking".to_string()]);

        let bare: Trip = serde_json::from_str(r#"{"_id":"t2"}"#).unwrap();
        assert_eq!(bare.address(), None);
        assert!(bare.tags.is_empty());
    }

    #[test]
    fn test_combined_response_missing_arrays() {
        let body: CombinedResponse = serde_json::from_str(r#"{"groups":[{"_id":"g1"}]}"#).unwrap();
        assert!(body.friends.is_empty());
        assert!(body.trips.is_empty());
        assert_eq!(body.groups.len(), 1);
    }

    #[test]
    fn test_user_display_name() {
        let mut user = User {
            id: "u1".into(),
            username: "dana".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "dana");
        user.first_name = Some("Dana".into());
        user.last_name = Some("Levi".into());
        assert_eq!(user.display_name(), "Dana Levi");
    }
}
