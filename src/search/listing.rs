//! State of a filterable list screen (Groups, Trips)
//!
//! The session keeps the last full fetch as a backup and always derives the
//! displayed list from it, so removing one chip never compounds earlier
//! filtering.

use super::filter::{FilterProfile, Filterable, apply};
use super::paginate::Paginator;
use crate::filters::{FilterSelection, FilterToken, codec};
use crate::models::{Group, Trip};
use tracing::debug;

/// A filterable list screen: full backup, derived display list, chips and pagination
pub struct ListSession<T> {
    profile: FilterProfile,
    backup: Vec<T>,
    displayed: Vec<T>,
    tokens: Vec<FilterToken>,
    paginator: Paginator,
}

/// Groups screen session
pub type GroupList = ListSession<Group>;
/// Trips screen session
pub type TripList = ListSession<Trip>;

impl GroupList {
    #[must_use]
    pub fn groups(page_size: usize) -> Self {
        Self::new(FilterProfile::GROUPS_PAGE, page_size)
    }
}

impl TripList {
    #[must_use]
    pub fn trips(page_size: usize) -> Self {
        Self::new(FilterProfile::TRIPS, page_size)
    }
}

impl<T: Filterable + Clone> ListSession<T> {
    #[must_use]
    pub fn new(profile: FilterProfile, page_size: usize) -> Self {
        Self {
            profile,
            backup: Vec::new(),
            displayed: Vec::new(),
            tokens: Vec::new(),
            paginator: Paginator::new(page_size),
        }
    }

    /// Install a freshly fetched collection as the new backup
    pub fn replace_backup(&mut self, items: Vec<T>) {
        debug!(count = items.len(), "list backup refreshed");
        self.backup = items;
        self.recompute();
    }

    /// Replace the active filters with `selection`
    ///
    /// Categories the screen does not filter on produce no chip.
    pub fn apply_selection(&mut self, selection: &FilterSelection) {
        self.tokens = codec::encode(selection)
            .into_iter()
            .filter(|t| t.category().is_some_and(|c| self.profile.allows(c)))
            .collect();
        self.recompute();
    }

    /// Add one chip, replacing any chip of the same single-valued category;
    /// returns `false` if it was already active or the screen does not filter
    /// on its category
    pub fn add_token(&mut self, token: FilterToken) -> bool {
        if !token.category().is_some_and(|c| self.profile.allows(c)) {
            return false;
        }
        let added = codec::push_token(&mut self.tokens, token);
        if added {
            self.recompute();
        }
        added
    }

    /// Remove one chip and re-filter the backup; returns `false` if no chip had that id
    pub fn remove_token(&mut self, id: &str) -> bool {
        let remaining = codec::without(&self.tokens, id);
        if remaining.len() == self.tokens.len() {
            return false;
        }
        self.tokens = remaining;
        self.recompute();
        true
    }

    /// Drop every chip
    pub fn clear_filters(&mut self) {
        self.tokens.clear();
        self.recompute();
    }

    /// Selection to pre-populate the filter editor with
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        codec::decode(&self.tokens)
    }

    #[must_use]
    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    #[must_use]
    pub fn backup(&self) -> &[T] {
        &self.backup
    }

    /// Filtered, unpaginated list
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.displayed
    }

    /// The page(s) currently shown
    #[must_use]
    pub fn visible(&self) -> &[T] {
        self.paginator.visible(&self.displayed)
    }

    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.paginator.can_load_more(self.displayed.len())
    }

    pub fn load_more(&mut self) {
        self.paginator.load_more();
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    fn recompute(&mut self) {
        let selection = self.selection();
        self.displayed = apply(&self.backup, &selection, &self.profile);
        self.paginator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterCategory;
    use crate::testing::{group, trip};

    fn ids(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    fn test_filters_derive_from_backup() {
        let mut list = GroupList::groups(5);
        list.replace_backup(vec![
            group("g1", "advanced", 5, "planned"),
            group("g2", "beginner", 20, "active"),
        ]);

        list.apply_selection(&FilterSelection::builder().difficulty("advanced").build());
        assert_eq!(ids(list.items()), vec!["g1"]);
        assert_eq!(list.backup().len(), 2);

        assert!(list.remove_token("groupDifficulty=advanced"));
        assert_eq!(ids(list.items()), vec!["g1", "g2"]);
        assert!(list.tokens().is_empty());
    }

    #[test]
    fn test_new_fetch_reapplies_tokens() {
        let mut list = GroupList::groups(5);
        list.apply_selection(&FilterSelection::builder().max_members("10").build());
        list.replace_backup(vec![
            group("small", "beginner", 6, "planned"),
            group("big", "beginner", 40, "planned"),
        ]);
        assert_eq!(ids(list.items()), vec!["small"]);
    }

    #[test]
    fn test_remove_unknown_token() {
        let mut list = TripList::trips(5);
        assert!(!list.remove_token("tripTag=Snow"));
    }

    #[test]
    fn test_foreign_categories_produce_no_chips() {
        let mut list = TripList::trips(5);
        list.replace_backup(vec![trip("t1", &["Snow"], None)]);
        list.apply_selection(
            &FilterSelection::builder()
                .difficulty("advanced")
                .tag("Snow")
                .build(),
        );
        assert_eq!(list.tokens().len(), 1);
        assert_eq!(list.tokens()[0].category(), Some(FilterCategory::TripTag));
        assert_eq!(list.items().len(), 1);
    }

    #[test]
    fn test_add_token_and_selection() {
        let mut list = GroupList::groups(5);
        assert!(list.add_token(FilterToken::new(FilterCategory::GroupStatus, "active")));
        assert!(!list.add_token(FilterToken::new(FilterCategory::GroupStatus, "active")));
        assert!(!list.add_token(FilterToken::new(FilterCategory::TripTag, "Snow")));
        assert_eq!(list.selection(), FilterSelection::builder().status("active").build());

        list.clear_filters();
        assert!(list.tokens().is_empty());
    }

    #[test]
    fn test_max_members_chip_is_replaced() {
        let mut list = GroupList::groups(5);
        list.replace_backup(vec![
            group("a", "beginner", 8, "planned"),
            group("b", "beginner", 15, "planned"),
        ]);

        assert!(list.add_token(FilterToken::new(FilterCategory::GroupMaxMembers, "10")));
        assert_eq!(ids(list.items()), vec!["a"]);
        assert!(list.add_token(FilterToken::new(FilterCategory::GroupMaxMembers, "20")));

        assert_eq!(list.tokens().len(), 1);
        assert_eq!(list.tokens()[0].id, "groupMaxMembers=20");
        assert_eq!(ids(list.items()), vec!["a", "b"]);
        assert_eq!(codec::encode(&list.selection()), list.tokens());

        assert!(list.remove_token("groupMaxMembers=20"));
        assert!(list.tokens().is_empty());
        assert_eq!(ids(list.items()), vec!["a", "b"]);
    }

    #[test]
    fn test_pagination_resets_on_filter_change() {
        let mut list = GroupList::groups(2);
        list.replace_backup(
            (0..7)
                .map(|i| group(&format!("g{i}"), "beginner", 5, "planned"))
                .collect(),
        );
        assert_eq!(list.visible().len(), 2);
        list.load_more();
        list.load_more();
        assert_eq!(list.visible().len(), 6);
        assert!(list.can_load_more());

        list.apply_selection(&FilterSelection::builder().status("planned").build());
        assert_eq!(list.paginator().results_to_show(), 2);
        assert_eq!(list.visible().len(), 2);
    }
}
