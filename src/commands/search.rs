//! Search command - one-shot search across people, groups and trips

use crate::{
    HikeMeetError,
    api::SearchSource,
    cli::FilterArgs,
    config::HikeConfig,
    output,
    search::{ResultKind, SearchSession, driver},
};

type Result<T> = std::result::Result<T, HikeMeetError>;

/// Execute the search command
///
/// # Errors
/// Returns an error if the backend request fails
pub async fn execute<S: SearchSource>(
    source: &S,
    config: &HikeConfig,
    query: &str,
    kind: ResultKind,
    args: &FilterArgs,
    quiet: bool,
) -> Result<()> {
    let mut session = SearchSession::from_config(config);
    session.set_kind(kind);
    session.set_query(query);
    for token in &args.filters {
        session.add_token(token.clone());
    }

    driver::refresh(source, &mut session).await?;
    for _ in 1..args.pages {
        session.load_more();
    }

    for line in render(&session, quiet) {
        println!("{line}");
    }
    Ok(())
}

/// Lines describing the session's current page(s)
#[must_use]
pub fn render(session: &SearchSession, quiet: bool) -> Vec<String> {
    let all = session.aggregate();
    let shown = session.visible();
    let mut lines = Vec::with_capacity(shown.len() + 2);

    if !quiet {
        lines.push(output::chips(session.tokens()));
        if all.is_empty() {
            lines.push(output::no_results("results"));
            return lines;
        }
    }
    lines.extend(shown.iter().map(|r| output::result_row(r, quiet)));
    if !quiet && let Some(hint) = output::more_hint(shown.len(), all.len()) {
        lines.push(hint);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterToken;
    use crate::search::ResultSet;
    use crate::search::driver::fake::FakeSource;
    use crate::testing::{group, trip, user};

    fn source() -> FakeSource {
        FakeSource {
            results: ResultSet {
                people: vec![user("me"), user("u1")],
                groups: (0..12)
                    .map(|i| group(&format!("g{i}"), if i % 2 == 0 { "advanced" } else { "beginner" }, 5, "planned"))
                    .collect(),
                trips: vec![trip("t1", &["Snow"], None)],
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_quiet_render_lists_ids_only() {
        let config = HikeConfig {
            current_user_id: Some("me".into()),
            ..HikeConfig::default()
        };
        let mut session = SearchSession::from_config(&config);
        session.set_query("hermon");
        driver::refresh(&source(), &mut session).await.unwrap();

        let lines = render(&session, true);
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "u1");
        assert_eq!(lines[1], "g0");
    }

    #[tokio::test]
    async fn test_filters_and_pages() {
        let mut session = SearchSession::default();
        session.set_kind(ResultKind::Groups);
        session.set_query("arbel");
        session.add_token("groupDifficulty=advanced".parse::<FilterToken>().unwrap());
        driver::refresh(&source(), &mut session).await.unwrap();

        let lines = render(&session, true);
        assert_eq!(lines, vec!["g0", "g2", "g4", "g6", "g8", "g10"]);
    }

    #[tokio::test]
    async fn test_more_hint_when_truncated() {
        colored::control::set_override(false);
        let mut session = SearchSession::default();
        session.set_kind(ResultKind::Groups);
        session.set_query("arbel");
        driver::refresh(&source(), &mut session).await.unwrap();

        let lines = render(&session, false);
        assert!(lines.first().unwrap().starts_with("Filters:"));
        assert!(lines.last().unwrap().contains("10 of 12"));
    }

    #[tokio::test]
    async fn test_execute_propagates_backend_errors() {
        let failing = FakeSource {
            fail: true,
            ..Default::default()
        };
        let result = execute(
            &failing,
            &HikeConfig::default(),
            "snow",
            ResultKind::All,
            &FilterArgs::default(),
            true,
        )
        .await;
        assert!(matches!(result, Err(HikeMeetError::SearchError(_))));
    }
}
