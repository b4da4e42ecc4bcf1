//! Interactive command - debounced search loop over stdin
//!
//! Plain lines replace the query; the fetch fires once the input has been
//! quiet for the configured debounce delay. Lines starting with `:` are
//! commands that act on the current results without refetching, except
//! `:kind`, which fetches immediately.

use crate::{
    HikeMeetError,
    api::{ApiError, SearchSource},
    commands::search::render,
    config::HikeConfig,
    filters::FilterToken,
    search::{Debouncer, ResultKind, ResultSet, SearchError, SearchSession, Ticket},
};
use clap::ValueEnum;
use colored::Colorize;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

type Result<T> = std::result::Result<T, HikeMeetError>;

type FetchOutcome = (Ticket, std::result::Result<ResultSet, ApiError>);

const HELP: &str = "\
Type to search. Commands:
  :more               show the next page
  :kind <kind>        all, people, groups or trips
  :filter <cat=val>   add a filter chip, e.g. :filter tripTag=Snow
  :remove <cat=val>   remove a filter chip by its id
  :clear              remove every filter chip
  :help               show this help
  :quit               leave";

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Query(String),
    More,
    Kind(ResultKind),
    Filter(FilterToken),
    Remove(String),
    Clear,
    Help,
    Quit,
}

fn parse_input(line: &str) -> std::result::Result<Input, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Query(line.to_string()));
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(n, a)| (n, a.trim()));
    match (name, arg) {
        ("more" | "m", _) => Ok(Input::More),
        ("clear", _) => Ok(Input::Clear),
        ("help" | "h" | "?", _) => Ok(Input::Help),
        ("quit" | "q", _) => Ok(Input::Quit),
        ("kind" | "k", kind) => <ResultKind as ValueEnum>::from_str(kind, true)
            .map(Input::Kind)
            .map_err(|_| format!("Unknown kind '{kind}' (expected all, people, groups or trips)")),
        ("filter" | "f", token) => token
            .parse::<FilterToken>()
            .map(Input::Filter)
            .map_err(|e| e.to_string()),
        ("remove" | "r", "") => Err("Usage: :remove <category=value>".to_string()),
        ("remove" | "r", id) => Ok(Input::Remove(id.to_string())),
        _ => Err(format!("Unknown command ':{name}' (try :help)")),
    }
}

/// Execute the interactive command on stdin
///
/// # Errors
/// Returns an error if reading stdin fails
pub async fn execute<S>(source: Arc<S>, config: &HikeConfig, kind: ResultKind, quiet: bool) -> Result<()>
where
    S: SearchSource + Send + Sync + 'static,
{
    if !quiet {
        println!("{HELP}");
    }
    let stdin = BufReader::new(tokio::io::stdin());
    run(source, config, kind, stdin, quiet).await?;
    Ok(())
}

/// Drive a search session from `input` until `:quit`, or until input ends
/// and every pending fetch has resolved
///
/// # Errors
/// Returns `SearchError::Io` if reading `input` fails
pub async fn run<S, R>(
    source: Arc<S>,
    config: &HikeConfig,
    kind: ResultKind,
    input: R,
    quiet: bool,
) -> std::result::Result<SearchSession, SearchError>
where
    S: SearchSource + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut session = SearchSession::from_config(config);
    session.set_kind(kind);

    let (mut debouncer, mut settled) = Debouncer::<String>::new(config.search.debounce());
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut lines = input.lines();
    let mut input_open = true;
    let mut query_pending = false;
    let mut in_flight = 0usize;

    loop {
        if !input_open && !query_pending && in_flight == 0 {
            break;
        }

        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match parse_input(&line) {
                    Ok(Input::Query(query)) => {
                        if session.set_query(&query) {
                            debouncer.push(query);
                            query_pending = true;
                        }
                    }
                    Ok(Input::More) => {
                        session.load_more();
                        show(&session, quiet);
                    }
                    Ok(Input::Kind(next)) => {
                        if session.set_kind(next) {
                            debouncer.cancel();
                            query_pending = false;
                            spawn_fetch(&source, &mut session, &done_tx);
                            in_flight += 1;
                        }
                    }
                    Ok(Input::Filter(token)) => {
                        session.add_token(token);
                        show(&session, quiet);
                    }
                    Ok(Input::Remove(id)) => {
                        if session.remove_token(&id) {
                            show(&session, quiet);
                        } else {
                            eprintln!("{} no active filter '{id}'", "Warning:".yellow());
                        }
                    }
                    Ok(Input::Clear) => {
                        session.clear_filters();
                        show(&session, quiet);
                    }
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Err(message) => eprintln!("{} {message}", "Error:".red()),
                }
            }
            Some(query) = settled.recv() => {
                debug!(%query, "query settled");
                query_pending = false;
                spawn_fetch(&source, &mut session, &done_tx);
                in_flight += 1;
            }
            Some((ticket, outcome)) = done_rx.recv() => {
                in_flight = in_flight.saturating_sub(1);
                match outcome {
                    Ok(results) => {
                        if session.apply_results(ticket, results) {
                            show(&session, quiet);
                        } else {
                            debug!(ticket = ticket.get(), "stale response dropped");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "search failed");
                        eprintln!("{} {e}", "Error:".red());
                    }
                }
            }
            else => return Err(SearchError::ChannelClosed),
        }
    }

    debouncer.cancel();
    Ok(session)
}

/// Issue a fetch for the session's current query and kind
///
/// The response comes back on `done` tagged with its ticket. A blank query
/// resolves to an empty result set without touching the backend.
fn spawn_fetch<S>(source: &Arc<S>, session: &mut SearchSession, done: &mpsc::UnboundedSender<FetchOutcome>)
where
    S: SearchSource + Send + Sync + 'static,
{
    let ticket = session.begin_fetch();
    if session.query_is_blank() {
        let _ = done.send((ticket, Ok(ResultSet::default())));
        return;
    }

    let source = Arc::clone(source);
    let kind = session.kind();
    let query = session.query().to_string();
    let done = done.clone();
    tokio::spawn(async move {
        let outcome = source.search(kind, &query).await;
        let _ = done.send((ticket, outcome));
    });
}

fn show(session: &SearchSession, quiet: bool) {
    if !quiet {
        println!("{}", format!("── {} · \"{}\"", session.kind(), session.query()).dimmed());
    }
    for line in render(session, quiet) {
        println!("{line}");
    }
}
