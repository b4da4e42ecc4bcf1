//! List commands - show the full group or trip list, narrowed by filters

use crate::{
    HikeMeetError,
    api::SearchSource,
    cli::FilterArgs,
    config::HikeConfig,
    filters::FilterToken,
    output,
    search::{Filterable, ListSession, driver, listing::{GroupList, TripList}},
};
use colored::Colorize;

type Result<T> = std::result::Result<T, HikeMeetError>;

/// Execute the groups command
///
/// # Errors
/// Returns an error if the group list cannot be fetched
pub async fn groups<S: SearchSource>(source: &S, config: &HikeConfig, args: &FilterArgs, quiet: bool) -> Result<()> {
    let mut list = GroupList::groups(config.groups.page_size);
    add_tokens(&mut list, &args.filters, quiet);
    driver::load_groups(source, &mut list).await?;
    show(&mut list, args.pages, "groups", output::group_row, quiet);
    Ok(())
}

/// Execute the trips command
///
/// # Errors
/// Returns an error if the trip list cannot be fetched
pub async fn trips<S: SearchSource>(source: &S, config: &HikeConfig, args: &FilterArgs, quiet: bool) -> Result<()> {
    let mut list = TripList::trips(config.trips.page_size);
    add_tokens(&mut list, &args.filters, quiet);
    driver::load_trips(source, &mut list).await?;
    show(&mut list, args.pages, "trips", output::trip_row, quiet);
    Ok(())
}

fn add_tokens<T: Filterable + Clone>(list: &mut ListSession<T>, tokens: &[FilterToken], quiet: bool) {
    for token in tokens {
        if !list.add_token(token.clone()) && !quiet {
            eprintln!("{} filter '{}' does not apply here, ignoring", "Warning:".yellow(), token.id);
        }
    }
}

fn show<T: Filterable + Clone>(
    list: &mut ListSession<T>,
    pages: usize,
    what: &str,
    row: fn(&T, bool) -> String,
    quiet: bool,
) {
    for _ in 1..pages {
        list.load_more();
    }
    for line in render(list, what, row, quiet) {
        println!("{line}");
    }
}

/// Lines describing a list session's current page(s)
#[must_use]
pub fn render<T: Filterable + Clone>(
    list: &ListSession<T>,
    what: &str,
    row: fn(&T, bool) -> String,
    quiet: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    if !quiet {
        lines.push(output::chips(list.tokens()));
        if list.items().is_empty() {
            lines.push(output::no_results(what));
            return lines;
        }
    }
    lines.extend(list.visible().iter().map(|item| row(item, quiet)));
    if !quiet && let Some(hint) = output::more_hint(list.visible().len(), list.items().len()) {
        lines.push(hint);
    }
    lines
}
