//! Composing per-kind results into the list a screen renders

use crate::models::{Group, Trip, User};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource-kind selector on the Search screen
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    /// People, then groups, then trips
    #[default]
    All,
    /// Other hikers
    #[value(aliases = ["hikes", "hikers"])]
    People,
    Groups,
    #[value(alias = "trip")]
    Trips,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::People => "people",
            Self::Groups => "groups",
            Self::Trips => "trips",
        };
        f.write_str(name)
    }
}

/// One fetched page of results, per resource kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub people: Vec<User>,
    pub groups: Vec<Group>,
    pub trips: Vec<Trip>,
}

impl ResultSet {
    /// Total number of items across kinds
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len() + self.groups.len() + self.trips.len()
    }

    /// True when no kind has any item
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single row in the aggregate
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Person(User),
    Group(Group),
    Trip(Trip),
}

impl SearchResult {
    /// Backend id of the underlying resource
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Person(user) => &user.id,
            Self::Group(group) => &group.id,
            Self::Trip(trip) => &trip.id,
        }
    }

    /// Kind this row belongs to
    #[must_use]
    pub const fn kind(&self) -> ResultKind {
        match self {
            Self::Person(_) => ResultKind::People,
            Self::Group(_) => ResultKind::Groups,
            Self::Trip(_) => ResultKind::Trips,
        }
    }
}

/// Build the aggregate for a kind
///
/// `All` concatenates people, groups and trips in that order, each keeping
/// server order. The current user is dropped from people in every mode.
#[must_use]
pub fn compose(kind: ResultKind, results: &ResultSet, current_user_id: Option<&str>) -> Vec<SearchResult> {
    let people = || {
        results
            .people
            .iter()
            .filter(|u| current_user_id != Some(u.id.as_str()))
            .cloned()
            .map(SearchResult::Person)
    };
    let groups = || results.groups.iter().cloned().map(SearchResult::Group);
    let trips = || results.trips.iter().cloned().map(SearchResult::Trip);

    match kind {
        ResultKind::All => people().chain(groups()).chain(trips()).collect(),
        ResultKind::People => people().collect(),
        ResultKind::Groups => groups().collect(),
        ResultKind::Trips => trips().collect(),
    }
}
