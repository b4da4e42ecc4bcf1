//! Conversion between a `FilterSelection` and its chip tokens
//!
//! Tokens are how a selection is displayed, removed piecemeal, and handed
//! back to a filter editor so it can reopen pre-populated.

use super::types::{FilterCategory, FilterSelection, FilterToken};
use tracing::debug;

/// Expand a selection into one token per active value
///
/// Categories are emitted in [`FilterCategory::ALL`] order; values inside a
/// category keep their insertion order. Blank values produce no token.
#[must_use]
pub fn encode(selection: &FilterSelection) -> Vec<FilterToken> {
    FilterCategory::ALL
        .into_iter()
        .flat_map(|category| {
            selection
                .values(category)
                .into_iter()
                .map(move |value| FilterToken::new(category, value))
        })
        .collect()
}

/// Rebuild a selection from tokens
///
/// Each id is split on its first `=`. Unknown keys and ids without `=` are
/// skipped, so tokens written by a newer client never break an older one.
#[must_use]
pub fn decode(tokens: &[FilterToken]) -> FilterSelection {
    let mut selection = FilterSelection::new();
    for token in tokens {
        let Some((key, value)) = token.split() else {
            debug!(id = %token.id, "skipping token without separator");
            continue;
        };
        let Some(category) = FilterCategory::from_key(key) else {
            debug!(id = %token.id, "skipping token with unknown category");
            continue;
        };
        selection.set(category, value);
    }
    selection
}

/// The token list with one id removed
#[must_use]
pub fn without(tokens: &[FilterToken], id: &str) -> Vec<FilterToken> {
    tokens.iter().filter(|t| t.id != id).cloned().collect()
}

/// Add a chip to an active token list
///
/// Multi-valued categories append unless the id is already present. A scalar
/// category holds at most one chip, so its existing chip is replaced in place.
/// Returns `true` when the list changed.
pub fn push_token(tokens: &mut Vec<FilterToken>, token: FilterToken) -> bool {
    if tokens.iter().any(|t| t.id == token.id) {
        return false;
    }
    let scalar = token.category().filter(|c| !c.is_multi_valued());
    if let Some(category) = scalar
        && let Some(existing) = tokens.iter_mut().find(|t| t.category() == Some(category))
    {
        debug!(from = %existing.id, to = %token.id, "replacing scalar chip");
        *existing = token;
        return true;
    }
    tokens.push(token);
    true
}
