//! Testing utilities for hikemeet
//!
//! Fixture builders for groups, trips and users so unit tests can describe
//! collections in one line each.
//!
//! Only available when compiled with `cfg(test)`.

use crate::models::{Group, Location, Trip, User};

/// Build a group with the fields most filters look at
#[must_use]
pub fn group(id: &str, difficulty: &str, max_members: i64, status: &str) -> Group {
    Group {
        id: id.to_string(),
        name: format!("Group {id}"),
        difficulty: Some(difficulty.to_string()),
        status: Some(status.to_string()),
        max_members: Some(max_members),
        ..Default::default()
    }
}

/// Build a trip with tags and an optional address
#[must_use]
pub fn trip(id: &str, tags: &[&str], address: Option<&str>) -> Trip {
    Trip {
        id: id.to_string(),
        name: format!("Trip {id}"),
        location: address.map(|a| Location {
            address: Some(a.to_string()),
            coordinates: None,
        }),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        description: None,
    }
}

/// Build a user with only an id and username
#[must_use]
pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: format!("hiker-{id}"),
        ..Default::default()
    }
}
