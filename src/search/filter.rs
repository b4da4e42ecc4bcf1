//! Predicate engine shared by the Groups, Trips and Search screens
//!
//! Every category is matched by one function here; a [`FilterProfile`] says
//! which categories a given screen honours and how it compares statuses.
//! Criteria are combined with AND. Difficulty and status match when the item
//! has any selected value; trip tags match only when the trip has all of them.
//!
//! # Iterator Adapters
//!
//! [`SelectionFilterExt`] adds the engine to any iterator of filterable items:
//!
//! ```
//! use hikemeet::filters::FilterSelection;
//! use hikemeet::models::Group;
//! use hikemeet::search::filter::{FilterProfile, SelectionFilterExt};
//!
//! let groups = vec![Group { id: "g1".into(), difficulty: Some("advanced".into()), ..Default::default() }];
//! let selection = FilterSelection::builder().difficulty("advanced").build();
//!
//! let hits = groups.iter().cloned().filter_selection(&selection, &FilterProfile::GROUPS_PAGE);
//! assert_eq!(hits.len(), 1);
//! ```

use crate::filters::{Criterion, FilterCategory, FilterSelection};
use crate::models::{Group, Trip};

/// How a status criterion compares values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMatch {
    /// Item status compared verbatim against the selected values
    Exact,
    /// Item status lower-cased first; selected values compared as given
    LowercaseItem,
}

/// The categories a screen filters on, and its status comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProfile {
    pub categories: &'static [FilterCategory],
    pub status_match: StatusMatch,
}

const GROUP_CATEGORIES: &[FilterCategory] = &[
    FilterCategory::GroupDifficulty,
    FilterCategory::GroupStatus,
    FilterCategory::GroupMaxMembers,
    FilterCategory::GroupStart,
    FilterCategory::GroupEnd,
];

const TRIP_CATEGORIES: &[FilterCategory] = &[FilterCategory::TripTag, FilterCategory::TripLocation];

impl FilterProfile {
    /// Groups list screen
    pub const GROUPS_PAGE: Self = Self {
        categories: GROUP_CATEGORIES,
        status_match: StatusMatch::LowercaseItem,
    };

    /// Group results on the Search screen
    pub const SEARCH_GROUPS: Self = Self {
        categories: GROUP_CATEGORIES,
        status_match: StatusMatch::Exact,
    };

    /// Trips list screen and trip results on the Search screen
    pub const TRIPS: Self = Self {
        categories: TRIP_CATEGORIES,
        status_match: StatusMatch::Exact,
    };

    /// Whether this profile honours a category
    #[must_use]
    pub fn allows(&self, category: FilterCategory) -> bool {
        self.categories.contains(&category)
    }

    /// The selection's criteria that this profile honours
    #[must_use]
    pub fn criteria(&self, selection: &FilterSelection) -> Vec<Criterion> {
        selection
            .criteria()
            .into_iter()
            .filter(|c| self.allows(c.category()))
            .collect()
    }
}

/// Field access the predicates need
///
/// Fields a resource kind does not have default to absent, which makes the
/// matching predicate fail.
pub trait Filterable {
    fn difficulty(&self) -> Option<&str> {
        None
    }

    fn status(&self) -> Option<&str> {
        None
    }

    fn max_members(&self) -> Option<i64> {
        None
    }

    fn scheduled_start(&self) -> Option<&str> {
        None
    }

    fn scheduled_end(&self) -> Option<&str> {
        None
    }

    fn address(&self) -> Option<&str> {
        None
    }

    fn tags(&self) -> &[String] {
        &[]
    }
}

impl Filterable for Group {
    fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn max_members(&self) -> Option<i64> {
        self.max_members
    }

    fn scheduled_start(&self) -> Option<&str> {
        self.scheduled_start.as_deref()
    }

    fn scheduled_end(&self) -> Option<&str> {
        self.scheduled_end.as_deref()
    }
}

impl Filterable for Trip {
    fn address(&self) -> Option<&str> {
        Trip::address(self)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Check one item against one criterion
#[must_use]
pub fn matches_criterion<T: Filterable + ?Sized>(
    item: &T,
    criterion: &Criterion,
    status_match: StatusMatch,
) -> bool {
    match criterion {
        Criterion::MaxMembers(limit) => item.max_members().is_some_and(|m| m <= *limit),
        Criterion::Difficulty(wanted) => item
            .difficulty()
            .is_some_and(|d| wanted.iter().any(|w| w == d)),
        Criterion::Status(wanted) => item.status().is_some_and(|s| match status_match {
            StatusMatch::Exact => wanted.iter().any(|w| w == s),
            StatusMatch::LowercaseItem => {
                let lowered = s.to_lowercase();
                wanted.iter().any(|w| *w == lowered)
            }
        }),
        Criterion::ScheduledStart(start) => item
            .scheduled_start()
            .is_some_and(|s| s >= start.as_str()),
        Criterion::ScheduledEnd(end) => item.scheduled_end().is_some_and(|e| e <= end.as_str()),
        Criterion::Tags(required) => {
            let tags = item.tags();
            required.iter().all(|r| tags.contains(r))
        }
        Criterion::LocationSubstring(needle) => item
            .address()
            .is_some_and(|a| a.to_lowercase().contains(&needle.to_lowercase())),
    }
}

/// Check one item against every criterion
#[must_use]
pub fn matches_all<T: Filterable + ?Sized>(
    item: &T,
    criteria: &[Criterion],
    status_match: StatusMatch,
) -> bool {
    criteria
        .iter()
        .all(|c| matches_criterion(item, c, status_match))
}

/// Narrow a collection to the items satisfying the selection
///
/// Returns a new vector in the input's order. With no criterion the profile
/// honours, the result is a copy of the input.
pub fn by_selection<T: Filterable>(
    items: impl IntoIterator<Item = T>,
    selection: &FilterSelection,
    profile: &FilterProfile,
) -> Vec<T> {
    let criteria = profile.criteria(selection);
    if criteria.is_empty() {
        return items.into_iter().collect();
    }

    items
        .into_iter()
        .filter(|item| matches_all(item, &criteria, profile.status_match))
        .collect()
}

/// Slice convenience over [`by_selection`]
#[must_use]
pub fn apply<T: Filterable + Clone>(
    items: &[T],
    selection: &FilterSelection,
    profile: &FilterProfile,
) -> Vec<T> {
    by_selection(items.iter().cloned(), selection, profile)
}

/// Extension trait adding selection filtering to iterators
pub trait SelectionFilterExt<T: Filterable>: IntoIterator<Item = T> + Sized {
    /// Keep the items matching `selection` under `profile`
    fn filter_selection(self, selection: &FilterSelection, profile: &FilterProfile) -> Vec<T> {
        by_selection(self, selection, profile)
    }
}

impl<T: Filterable, I> SelectionFilterExt<T> for I where I: IntoIterator<Item = T> {}
