//! Search screen state
//!
//! Holds the query, the selected resource kind, the raw results of the last
//! applied fetch, the active filter chips and the pagination cursor. Group
//! and trip results are narrowed by the chips; people are only filtered by
//! self-exclusion.

use super::aggregate::{ResultKind, ResultSet, SearchResult, compose};
use super::filter::{FilterProfile, apply};
use super::paginate::Paginator;
use super::sequence::{RequestSequencer, ResponseOrdering, Ticket};
use crate::config::HikeConfig;
use crate::filters::{FilterSelection, FilterToken, codec};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    kind: ResultKind,
    current_user_id: Option<String>,
    raw: ResultSet,
    filtered: ResultSet,
    aggregate: Vec<SearchResult>,
    tokens: Vec<FilterToken>,
    paginator: Paginator,
    sequencer: RequestSequencer,
}

impl SearchSession {
    #[must_use]
    pub fn new(page_size: usize, ordering: ResponseOrdering, current_user_id: Option<String>) -> Self {
        Self {
            query: String::new(),
            kind: ResultKind::All,
            current_user_id,
            raw: ResultSet::default(),
            filtered: ResultSet::default(),
            aggregate: Vec::new(),
            tokens: Vec::new(),
            paginator: Paginator::new(page_size),
            sequencer: RequestSequencer::new(ordering),
        }
    }

    /// Session configured from the search settings
    #[must_use]
    pub fn from_config(config: &HikeConfig) -> Self {
        Self::new(
            config.search.page_size,
            config.search.ordering,
            config.current_user_id.clone(),
        )
    }

    /// Update the query text; returns `true` if it changed
    pub fn set_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.paginator.reset();
        true
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query has no searchable text
    #[must_use]
    pub fn query_is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// Switch the resource kind; returns `true` if it changed
    pub fn set_kind(&mut self, kind: ResultKind) -> bool {
        if self.kind == kind {
            return false;
        }
        self.kind = kind;
        self.recompose();
        true
    }

    #[must_use]
    pub const fn kind(&self) -> ResultKind {
        self.kind
    }

    /// Ticket for a fetch about to be issued
    pub fn begin_fetch(&mut self) -> Ticket {
        self.sequencer.issue()
    }

    /// Apply a resolved fetch; returns `false` if the ordering policy dropped it
    pub fn apply_results(&mut self, ticket: Ticket, results: ResultSet) -> bool {
        if !self.sequencer.accept(ticket) {
            return false;
        }
        debug!(ticket = ticket.get(), count = results.len(), "search results applied");
        self.raw = results;
        self.recompute();
        true
    }

    /// Whether an issued fetch has not been applied yet
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.sequencer.is_waiting()
    }

    /// Replace the active filters with `selection`
    pub fn apply_selection(&mut self, selection: &FilterSelection) {
        self.tokens = codec::encode(selection);
        self.recompute();
    }

    /// Add one chip, replacing any chip of the same single-valued category;
    /// returns `false` if it was already active
    pub fn add_token(&mut self, token: FilterToken) -> bool {
        let added = codec::push_token(&mut self.tokens, token);
        if added {
            self.recompute();
        }
        added
    }

    /// Remove one chip and re-filter the raw results; returns `false` if no chip had that id
    pub fn remove_token(&mut self, id: &str) -> bool {
        let remaining = codec::without(&self.tokens, id);
        if remaining.len() == self.tokens.len() {
            return false;
        }
        self.tokens = remaining;
        self.recompute();
        true
    }

    pub fn clear_filters(&mut self) {
        self.tokens.clear();
        self.recompute();
    }

    #[must_use]
    pub fn tokens(&self) -> &[FilterToken] {
        &self.tokens
    }

    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        codec::decode(&self.tokens)
    }

    /// Raw results of the last applied fetch
    #[must_use]
    pub const fn raw(&self) -> &ResultSet {
        &self.raw
    }

    /// Kind-composed, filtered, unpaginated list
    #[must_use]
    pub fn aggregate(&self) -> &[SearchResult] {
        &self.aggregate
    }

    /// The page(s) currently shown
    #[must_use]
    pub fn visible(&self) -> &[SearchResult] {
        self.paginator.visible(&self.aggregate)
    }

    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.paginator.can_load_more(self.aggregate.len())
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
        self.filtered = ResultSet {
            people: self.raw.people.clone(),
            groups: apply(&self.raw.groups, &selection, &FilterProfile::SEARCH_GROUPS),
            trips: apply(&self.raw.trips, &selection, &FilterProfile::TRIPS),
        };
        self.recompose();
    }

    fn recompose(&mut self) {
        self.aggregate = compose(self.kind, &self.filtered, self.current_user_id.as_deref());
        self.paginator.reset();
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::from_config(&HikeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterCategory;
    use crate::testing::{group, trip, user};

    fn results(people: usize, groups: usize, trips: usize) -> ResultSet {
        ResultSet {
            people: (0..people).map(|i| user(&format!("u{i}"))).collect(),
            groups: (0..groups)
                .map(|i| group(&format!("g{i}"), "beginner", 5, "planned"))
                .collect(),
            trips: (0..trips).map(|i| trip(&format!("t{i}"), &[], None)).collect(),
        }
    }

    fn ids(rows: &[SearchResult]) -> Vec<&str> {
        rows.iter().map(SearchResult::id).collect()
    }

    #[test]
    fn test_self_is_excluded_from_people() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastResponse, Some("u0".into()));
        let ticket = session.begin_fetch();
        assert!(session.apply_results(ticket, results(3, 0, 0)));
        assert_eq!(ids(&session.aggregate()), vec!["u1", "u2"]);
    }

    #[test]
    fn test_query_change_resets_pagination() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastResponse, None);
        session.set_query("gal");
        let ticket = session.begin_fetch();
        session.apply_results(ticket, results(10, 10, 10));

        session.load_more();
        session.load_more();
        assert_eq!(session.visible().len(), 30);
        assert!(!session.can_load_more());

        assert!(session.set_query("galil"));
        assert_eq!(session.paginator().results_to_show(), 10);
        assert!(!session.set_query("galil"));
    }

    #[test]
    fn test_kind_change_resets_pagination() {
        let mut session = SearchSession::new(2, ResponseOrdering::LastResponse, None);
        let ticket = session.begin_fetch();
        session.apply_results(ticket, results(3, 3, 3));
        session.load_more();
        assert_eq!(session.visible().len(), 4);

        assert!(session.set_kind(ResultKind::Trips));
        assert_eq!(ids(&session.visible()), vec!["t0", "t1"]);
        assert!(session.can_load_more());
    }

    #[test]
    fn test_out_of_order_last_response_wins() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastResponse, None);
        let old = session.begin_fetch();
        let new = session.begin_fetch();
        assert!(session.apply_results(new, results(0, 2, 0)));
        assert!(session.apply_results(old, results(0, 5, 0)));
        assert_eq!(session.aggregate().len(), 5);
        assert!(!session.is_waiting());
    }

    #[test]
    fn test_out_of_order_last_request_wins() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastRequest, None);
        let old = session.begin_fetch();
        let new = session.begin_fetch();
        assert!(session.is_waiting());
        assert!(session.apply_results(new, results(0, 2, 0)));
        assert!(!session.apply_results(old, results(0, 5, 0)));
        assert_eq!(session.aggregate().len(), 2);
    }

    #[test]
    fn test_filters_narrow_groups_and_trips_only() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastResponse, None);
        let ticket = session.begin_fetch();
        session.apply_results(
            ticket,
            ResultSet {
                people: vec![user("u1")],
                groups: vec![
                    group("g1", "advanced", 5, "planned"),
                    group("g2", "beginner", 5, "Planned"),
                ],
                trips: vec![trip("t1", &["Snow"], None), trip("t2", &["Beach"], None)],
            },
        );

        session.apply_selection(
            &FilterSelection::builder()
                .status("planned")
                .tag("Snow")
                .build(),
        );
        assert_eq!(ids(&session.aggregate()), vec!["u1", "g1", "t1"]);

        assert!(session.remove_token("tripTag=Snow"));
        assert_eq!(ids(&session.aggregate()), vec!["u1", "g1", "t1", "t2"]);

        session.clear_filters();
        assert_eq!(session.aggregate().len(), 5);
    }

    #[test]
    fn test_max_members_chip_is_replaced() {
        let mut session = SearchSession::new(10, ResponseOrdering::LastResponse, None);
        let ticket = session.begin_fetch();
        session.apply_results(
            ticket,
            ResultSet {
                groups: vec![
                    group("a", "beginner", 8, "planned"),
                    group("b", "beginner", 15, "planned"),
                ],
                ..Default::default()
            },
        );

        assert!(session.add_token(FilterToken::new(FilterCategory::GroupMaxMembers, "10")));
        assert_eq!(ids(session.aggregate()), vec!["a"]);
        assert!(session.add_token(FilterToken::new(FilterCategory::GroupMaxMembers, "20")));

        assert_eq!(session.tokens().len(), 1);
        assert_eq!(session.tokens()[0].id, "groupMaxMembers=20");
        assert_eq!(ids(session.aggregate()), vec!["a", "b"]);
        assert_eq!(codec::encode(&session.selection()), session.tokens());
    }

    #[test]
    fn test_visible_is_a_page_of_the_aggregate() {
        let mut session = SearchSession::new(2, ResponseOrdering::LastResponse, None);
        let ticket = session.begin_fetch();
        session.apply_results(ticket, results(2, 2, 1));

        assert_eq!(session.aggregate().len(), 5);
        assert!(std::ptr::eq(session.visible().as_ptr(), session.aggregate().as_ptr()));
        assert_eq!(ids(session.visible()), vec!["u0", "u1"]);

        session.add_token(FilterToken::new(FilterCategory::TripTag, "Snow"));
        assert_eq!(ids(session.aggregate()), vec!["u0", "u1", "g0", "g1"]);
        assert_eq!(session.visible(), &session.aggregate()[..2]);
        assert!(session.can_load_more());
    }

    #[test]
    fn test_default_uses_search_page_size() {
        let session = SearchSession::default();
        assert_eq!(session.paginator().page_size(), 10);
        assert_eq!(session.kind(), ResultKind::All);
        assert!(session.query_is_blank());
    }
}
