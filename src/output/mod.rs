//! Output formatting for CLI display
//!
//! Rows for groups, trips and people, the active filter chips, and the
//! "show more" hint under a paginated list. In quiet mode rows collapse to
//! bare ids so the output can be piped.

use crate::filters::FilterToken;
use crate::models::{Group, Trip, User};
use crate::search::{ResultKind, SearchResult};
use colored::Colorize;

/// Format a group row
#[must_use]
pub fn group_row(group: &Group, quiet: bool) -> String {
    if quiet {
        return group.id.clone();
    }

    let mut details = Vec::new();
    if let Some(difficulty) = &group.difficulty {
        details.push(difficulty.yellow().to_string());
    }
    if let Some(status) = &group.status {
        details.push(status.clone());
    }
    if let Some(max) = group.max_members {
        details.push(format!("up to {max} members"));
    }
    match (&group.scheduled_start, &group.scheduled_end) {
        (Some(start), Some(end)) => details.push(format!("{} → {}", short_date(start), short_date(end))),
        (Some(start), None) => details.push(format!("from {}", short_date(start))),
        (None, Some(end)) => details.push(format!("until {}", short_date(end))),
        (None, None) => {}
    }

    if details.is_empty() {
        format!("  {}", group.name.bold())
    } else {
        format!("  {} ({})", group.name.bold(), details.join(", "))
    }
}

/// Format a trip row
#[must_use]
pub fn trip_row(trip: &Trip, quiet: bool) -> String {
    if quiet {
        return trip.id.clone();
    }

    let mut line = format!("  {}", trip.name.bold());
    if let Some(address) = trip.address() {
        line.push_str(&format!(" @ {address}"));
    }
    if !trip.tags.is_empty() {
        line.push_str(&format!(" [{}]", trip.tags.join(", ").cyan()));
    }
    line
}

/// Format a person row
#[must_use]
pub fn user_row(user: &User, quiet: bool) -> String {
    if quiet {
        user.id.clone()
    } else if user.username.is_empty() {
        format!("  {}", user.display_name().bold())
    } else {
        format!("  {} (@{})", user.display_name().bold(), user.username)
    }
}

/// Format one row of a composed search list, prefixed by its kind
#[must_use]
pub fn result_row(result: &SearchResult, quiet: bool) -> String {
    let row = match result {
        SearchResult::Person(user) => user_row(user, quiet),
        SearchResult::Group(group) => group_row(group, quiet),
        SearchResult::Trip(trip) => trip_row(trip, quiet),
    };
    if quiet {
        row
    } else {
        format!("{} {}", kind_badge(result.kind()), row.trim_start())
    }
}

fn kind_badge(kind: ResultKind) -> String {
    match kind {
        ResultKind::People => "[hiker]".blue().to_string(),
        ResultKind::Groups => "[group]".green().to_string(),
        ResultKind::Trips => "[trip] ".magenta().to_string(),
        ResultKind::All => "[all]  ".to_string(),
    }
}

/// Format the active filter chips on one line
///
/// Each chip shows its label followed by the id to pass to `:remove`.
#[must_use]
pub fn chips(tokens: &[FilterToken]) -> String {
    if tokens.is_empty() {
        return "Filters: (none)".dimmed().to_string();
    }
    let rendered: Vec<String> = tokens
        .iter()
        .map(|t| format!("[{} ✕ {}]", t.label.cyan(), t.id.dimmed()))
        .collect();
    format!("Filters: {}", rendered.join(" "))
}

/// Hint printed under a list when more rows exist than are shown
#[must_use]
pub fn more_hint(shown: usize, total: usize) -> Option<String> {
    (shown < total).then(|| {
        format!("  … showing {shown} of {total} (show more for the next page)")
            .dimmed()
            .to_string()
    })
}

/// Message for an empty list
#[must_use]
pub fn no_results(what: &str) -> String {
    format!("No {what} found").yellow().to_string()
}

fn short_date(value: &str) -> &str {
    value.get(..10).unwrap_or(value)
}
