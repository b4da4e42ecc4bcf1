//! Fetch-and-apply steps connecting a [`SearchSource`] to the screen sessions
//!
//! On failure the session is left untouched, so the screen keeps showing its
//! last-known collection.

use super::aggregate::ResultSet;
use super::error::SearchError;
use super::listing::{GroupList, TripList};
use super::session::SearchSession;
use crate::api::SearchSource;
use tracing::warn;

/// Fetch for the session's query and kind, then apply the response
///
/// A blank query applies an empty result set without touching the backend.
/// Returns whether the response was applied.
///
/// # Errors
///
/// Returns `SearchError::Api` if the backend request fails.
pub async fn refresh<S: SearchSource>(source: &S, session: &mut SearchSession) -> Result<bool, SearchError> {
    let ticket = session.begin_fetch();
    if session.query_is_blank() {
        return Ok(session.apply_results(ticket, ResultSet::default()));
    }

    let results = source
        .search(session.kind(), session.query())
        .await
        .inspect_err(|e| warn!(query = session.query(), error = %e, "search failed"))?;
    Ok(session.apply_results(ticket, results))
}

/// Reload the Groups screen backup from the full group list
///
/// # Errors
///
/// Returns `SearchError::Api` if the backend request fails.
pub async fn load_groups<S: SearchSource>(source: &S, list: &mut GroupList) -> Result<(), SearchError> {
    let groups = source
        .list_groups()
        .await
        .inspect_err(|e| warn!(error = %e, "loading groups failed"))?;
    list.replace_backup(groups);
    Ok(())
}

/// Reload the Trips screen backup from the full trip list
///
/// # Errors
///
/// Returns `SearchError::Api` if the backend request fails.
pub async fn load_trips<S: SearchSource>(source: &S, list: &mut TripList) -> Result<(), SearchError> {
    let trips = source
        .list_trips()
        .await
        .inspect_err(|e| warn!(error = %e, "loading trips failed"))?;
    list.replace_backup(trips);
    Ok(())
}
