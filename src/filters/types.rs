//! Filter data structures and types
//!
//! This module defines the core data structures for screen filters:
//! - `FilterCategory`: The known token categories (`groupDifficulty`, `tripTag`, ...)
//! - `FilterToken`: A removable chip, `id = "<category>=<value>"` plus a label
//! - `FilterSelection`: The per-screen, category-keyed selection
//! - `Criterion`: One normalised, typed condition derived from a selection

use super::error::FilterError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Category half of a token id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    GroupDifficulty,
    GroupStatus,
    GroupMaxMembers,
    GroupStart,
    GroupEnd,
    TripTag,
    TripLocation,
}

impl FilterCategory {
    /// All categories, in the order tokens are emitted
    pub const ALL: [Self; 7] = [
        Self::GroupDifficulty,
        Self::GroupStatus,
        Self::GroupMaxMembers,
        Self::GroupStart,
        Self::GroupEnd,
        Self::TripTag,
        Self::TripLocation,
    ];

    /// Key used on the left of `=` in a token id
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::GroupDifficulty => "groupDifficulty",
            Self::GroupStatus => "groupStatus",
            Self::GroupMaxMembers => "groupMaxMembers",
            Self::GroupStart => "groupStart",
            Self::GroupEnd => "groupEnd",
            Self::TripTag => "tripTag",
            Self::TripLocation => "tripLocation",
        }
    }

    /// Look up a category by its token key
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    /// Whether the category holds a set of values rather than one scalar
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(
            self,
            Self::GroupDifficulty | Self::GroupStatus | Self::TripTag
        )
    }

    const fn label_prefix(self) -> &'static str {
        match self {
            Self::GroupDifficulty => "Difficulty",
            Self::GroupStatus => "Status",
            Self::GroupMaxMembers => "Max members",
            Self::GroupStart => "From",
            Self::GroupEnd => "Until",
            Self::TripTag => "Tag",
            Self::TripLocation => "Location",
        }
    }

    /// Human-readable chip label for a value of this category
    #[must_use]
    pub fn label(self, value: &str) -> String {
        let shown = match self {
            Self::GroupStart | Self::GroupEnd => date_label(value),
            _ => value.to_string(),
        };
        format!("{}: {shown}", self.label_prefix())
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Render a date value as `YYYY-MM-DD` when it parses, otherwise verbatim
fn date_label(value: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return timestamp.date_naive().format("%Y-%m-%d").to_string();
    }
    value.to_string()
}

/// A removable filter chip
///
/// The `id` is the only part used for matching; `label` is display text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct FilterToken {
    pub id: String,
    pub label: String,
}

impl FilterToken {
    /// Build a token for one category value
    #[must_use]
    pub fn new(category: FilterCategory, value: &str) -> Self {
        Self {
            id: format!("{}={value}", category.key()),
            label: category.label(value),
        }
    }

    /// Split the id on the first `=` into `(key, value)`
    #[must_use]
    pub fn split(&self) -> Option<(&str, &str)> {
        self.id.split_once('=')
    }

    /// Category of this token, if the key is known
    #[must_use]
    pub fn category(&self) -> Option<FilterCategory> {
        self.split().and_then(|(key, _)| FilterCategory::from_key(key))
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl FromStr for FilterToken {
    type Err = FilterError;

    /// Parse a user-typed `category=value` token
    ///
    /// Stricter than [`decode`](super::codec::decode): unknown categories and
    /// empty values are rejected so typos surface instead of silently matching
    /// everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| FilterError::MissingSeparator(s.to_string()))?;
        let category = FilterCategory::from_key(key.trim())
            .ok_or_else(|| FilterError::UnknownCategory(key.trim().to_string()))?;
        let value = value.trim();
        if value.is_empty() {
            return Err(FilterError::EmptyValue(s.to_string()));
        }
        Ok(Self::new(category, value))
    }
}

/// Per-screen filter selection
///
/// Multi-valued categories keep insertion order and never hold duplicates.
/// Scalars are stored raw; whitespace-only scalars count as unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    #[serde(default)]
    pub difficulties: Vec<String>,

    #[serde(default)]
    pub statuses: Vec<String>,

    /// Trip tags; every one must be present on a trip
    #[serde(default)]
    pub tags: Vec<String>,

    /// Kept as typed text; a value that is not an integer is ignored
    #[serde(default)]
    pub max_members: Option<String>,

    #[serde(default)]
    pub scheduled_start: Option<String>,

    #[serde(default)]
    pub scheduled_end: Option<String>,

    /// Case-insensitive substring of a trip's address
    #[serde(default)]
    pub location: Option<String>,
}

impl FilterSelection {
    /// Create a new empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new selection builder
    #[must_use]
    pub fn builder() -> FilterSelectionBuilder {
        FilterSelectionBuilder::default()
    }

    /// Set a value: appended for multi-valued categories, assigned for scalars
    pub fn set(&mut self, category: FilterCategory, value: &str) {
        match self.slot_mut(category) {
            Slot::Many(values) => {
                if !values.iter().any(|v| v == value) {
                    values.push(value.to_string());
                }
            }
            Slot::One(scalar) => *scalar = Some(value.to_string()),
        }
    }

    /// Toggle a value the way a chip/checkbox in the filter editor does
    ///
    /// Multi-valued categories add or remove the value; scalars are cleared
    /// when toggled with their current value and assigned otherwise.
    pub fn toggle(&mut self, category: FilterCategory, value: &str) {
        match self.slot_mut(category) {
            Slot::Many(values) => {
                if let Some(pos) = values.iter().position(|v| v == value) {
                    values.remove(pos);
                } else {
                    values.push(value.to_string());
                }
            }
            Slot::One(scalar) => {
                if scalar.as_deref() == Some(value) {
                    *scalar = None;
                } else {
                    *scalar = Some(value.to_string());
                }
            }
        }
    }

    /// Clear every value of one category
    pub fn clear(&mut self, category: FilterCategory) {
        match self.slot_mut(category) {
            Slot::Many(values) => values.clear(),
            Slot::One(scalar) => *scalar = None,
        }
    }

    /// Active values of a category: trimmed, empties dropped
    #[must_use]
    pub fn values(&self, category: FilterCategory) -> Vec<&str> {
        let raw: Vec<&str> = match category {
            FilterCategory::GroupDifficulty => self.difficulties.iter().map(String::as_str).collect(),
            FilterCategory::GroupStatus => self.statuses.iter().map(String::as_str).collect(),
            FilterCategory::TripTag => self.tags.iter().map(String::as_str).collect(),
            FilterCategory::GroupMaxMembers => self.max_members.as_deref().into_iter().collect(),
            FilterCategory::GroupStart => self.scheduled_start.as_deref().into_iter().collect(),
            FilterCategory::GroupEnd => self.scheduled_end.as_deref().into_iter().collect(),
            FilterCategory::TripLocation => self.location.as_deref().into_iter().collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// True when no category contributes a criterion
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria().is_empty()
    }

    /// Normalise the selection into typed criteria
    ///
    /// A `max_members` value that does not parse as an integer yields no criterion.
    #[must_use]
    pub fn criteria(&self) -> Vec<Criterion> {
        let owned = |category| -> Vec<String> {
            self.values(category).into_iter().map(str::to_string).collect()
        };
        let first = |category| self.values(category).first().map(|v| (*v).to_string());

        let mut criteria = Vec::new();

        let difficulties = owned(FilterCategory::GroupDifficulty);
        if !difficulties.is_empty() {
            criteria.push(Criterion::Difficulty(difficulties));
        }

        let statuses = owned(FilterCategory::GroupStatus);
        if !statuses.is_empty() {
            criteria.push(Criterion::Status(statuses));
        }

        if let Some(raw) = first(FilterCategory::GroupMaxMembers) {
            match raw.parse::<i64>() {
                Ok(limit) => criteria.push(Criterion::MaxMembers(limit)),
                Err(e) => debug!(value = %raw, error = %e, "ignoring non-numeric max members"),
            }
        }

        if let Some(start) = first(FilterCategory::GroupStart) {
            criteria.push(Criterion::ScheduledStart(start));
        }

        if let Some(end) = first(FilterCategory::GroupEnd) {
            criteria.push(Criterion::ScheduledEnd(end));
        }

        let tags = owned(FilterCategory::TripTag);
        if !tags.is_empty() {
            criteria.push(Criterion::Tags(tags));
        }

        if let Some(location) = first(FilterCategory::TripLocation) {
            criteria.push(Criterion::LocationSubstring(location));
        }

        criteria
    }

    fn slot_mut(&mut self, category: FilterCategory) -> Slot<'_> {
        match category {
            FilterCategory::GroupDifficulty => Slot::Many(&mut self.difficulties),
            FilterCategory::GroupStatus => Slot::Many(&mut self.statuses),
            FilterCategory::TripTag => Slot::Many(&mut self.tags),
            FilterCategory::GroupMaxMembers => Slot::One(&mut self.max_members),
            FilterCategory::GroupStart => Slot::One(&mut self.scheduled_start),
            FilterCategory::GroupEnd => Slot::One(&mut self.scheduled_end),
            FilterCategory::TripLocation => Slot::One(&mut self.location),
        }
    }
}

enum Slot<'a> {
    Many(&'a mut Vec<String>),
    One(&'a mut Option<String>),
}

/// Builder for `FilterSelection`
#[derive(Debug, Clone, Default)]
pub struct FilterSelectionBuilder {
    selection: FilterSelection,
}

impl FilterSelectionBuilder {
    /// Add a difficulty level
    #[must_use]
    pub fn difficulty(mut self, difficulty: &str) -> Self {
        self.selection.set(FilterCategory::GroupDifficulty, difficulty);
        self
    }

    /// Add a group status
    #[must_use]
    pub fn status(mut self, status: &str) -> Self {
        self.selection.set(FilterCategory::GroupStatus, status);
        self
    }

    /// Add a required trip tag
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.selection.set(FilterCategory::TripTag, tag);
        self
    }

    /// Set the maximum group size (typed text)
    #[must_use]
    pub fn max_members(mut self, max: &str) -> Self {
        self.selection.set(FilterCategory::GroupMaxMembers, max);
        self
    }

    /// Set the earliest scheduled start
    #[must_use]
    pub fn scheduled_start(mut self, start: &str) -> Self {
        self.selection.set(FilterCategory::GroupStart, start);
        self
    }

    /// Set the latest scheduled end
    #[must_use]
    pub fn scheduled_end(mut self, end: &str) -> Self {
        self.selection.set(FilterCategory::GroupEnd, end);
        self
    }

    /// Set the address substring
    #[must_use]
    pub fn location(mut self, location: &str) -> Self {
        self.selection.set(FilterCategory::TripLocation, location);
        self
    }

    /// Build the `FilterSelection`
    #[must_use]
    pub fn build(self) -> FilterSelection {
        self.selection
    }
}

/// One typed filter condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// `max_members <= limit`
    MaxMembers(i64),
    /// Difficulty is any of these
    Difficulty(Vec<String>),
    /// Status is any of these
    Status(Vec<String>),
    /// Scheduled start is on or after this date string
    ScheduledStart(String),
    /// Scheduled end is on or before this date string
    ScheduledEnd(String),
    /// Trip carries all of these tags
    Tags(Vec<String>),
    /// Address contains this text, ignoring case
    LocationSubstring(String),
}

impl Criterion {
    /// Category this criterion was derived from
    #[must_use]
    pub const fn category(&self) -> FilterCategory {
        match self {
            Self::MaxMembers(_) => FilterCategory::GroupMaxMembers,
            Self::Difficulty(_) => FilterCategory::GroupDifficulty,
            Self::Status(_) => FilterCategory::GroupStatus,
            Self::ScheduledStart(_) => FilterCategory::GroupStart,
            Self::ScheduledEnd(_) => FilterCategory::GroupEnd,
            Self::Tags(_) => FilterCategory::TripTag,
            Self::LocationSubstring(_) => FilterCategory::TripLocation,
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for category in FilterCategory::ALL {
            let values = self.values(category);
            if values.is_empty() {
                continue;
            }
            any = true;
            writeln!(f, "{}: {}", category.label_prefix(), values.join(", "))?;
        }
        if !any {
            writeln!(f, "Filters: (none)")?;
        }
        Ok(())
    }
}
