// `trendscout trending` - resolve, fetch, page, print
use crate::{
    display::print_repositories,
    iostreams::IoStreams,
    search::TrendingSource,
    table::TableLayout,
    trending::{fetch_trending, TrendingQuery},
    Result,
};
use chrono::{DateTime, TimeZone};
use std::fmt;
use std::io::Write;
use tracing::{debug, warn};

/// Run one trending lookup and print it
///
/// Range and fetch errors come back untouched, and nothing has been written
/// by then. Once the pager is up, output problems are only logged.
pub async fn trending_run<S, Tz>(
    query: &TrendingQuery,
    source: &S,
    io: &mut IoStreams,
    now: &DateTime<Tz>,
) -> Result<()>
where
    S: TrendingSource + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let range = query.range_expression(now)?;
    debug!("Resolved {} range: {}", query.window, range);

    let page = fetch_trending(source, &range, &query.language).await?;

    let is_tty = io.is_stdout_tty();
    let colors = io.colors();
    let layout = if is_tty {
        TableLayout::terminal(io.terminal_width())
    } else {
        TableLayout::plain()
    };

    let mut out = io.start_pager();

    if is_tty {
        let title = format!("Trending repositories (by {})", query.window);
        if let Err(e) = write!(out, "\n{}\n\n", title) {
            warn!("Failed to write title: {}", e);
        }
    }

    print_repositories(&mut out, &colors, layout, "", page.remaining(), page.items());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iostreams::ColorScheme;
    use crate::search::MockTrendingSource;
    use crate::Error;
    use chrono::Utc;
    use trendscout_api::graphql::RepositoryOwner;
    use trendscout_api::{GitHubError, RepositoryNode, SearchConnection};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    fn one_repo(total: u64) -> SearchConnection {
        SearchConnection {
            repository_count: total,
            nodes: vec![RepositoryNode {
                name: "enumtag".to_string(),
                url: "https://github.com/tcard/enumtag".to_string(),
                description: Some("Package enumtag.".to_string()),
                stargazer_count: 5,
                fork_count: 0,
                owner: RepositoryOwner {
                    login: "tcard".to_string(),
                },
                primary_language: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_request_carries_fixed_parameters() {
        let mut source = MockTrendingSource::new();
        source
            .expect_search()
            .withf(|vars| {
                vars.first == 30
                    && vars.search_type == "REPOSITORY"
                    && vars.query == "created:2024-03-14T00:00:00Z..2024-03-15T00:00:00Z"
            })
            .times(1)
            .returning(|_| {
                Ok(SearchConnection {
                    repository_count: 0,
                    nodes: Vec::new(),
                })
            });

        let (mut io, out) = IoStreams::test();
        trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap();

        assert_eq!(out.contents(), "");
    }

    #[tokio::test]
    async fn test_invalid_range_never_hits_the_network() {
        let mut source = MockTrendingSource::new();
        source.expect_search().times(0);

        let (mut io, out) = IoStreams::test();
        let query = TrendingQuery::new("abc", "");
        let err = trending_run(&query, &source, &mut io, &now())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "search range is not correct:'abc'; try day, week, month or year"
        );
        assert_eq!(out.contents(), "");
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let mut source = MockTrendingSource::new();
        source
            .expect_search()
            .times(1)
            .returning(|_| Err(Error::Query(GitHubError::GraphQl("boom".into()))));

        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);

        let err = trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Query(_)));
        assert_eq!(out.contents(), "", "title must not be printed before a failed fetch");
    }

    #[tokio::test]
    async fn test_terminal_gets_title_and_more_notice() {
        let mut source = MockTrendingSource::new();
        source
            .expect_search()
            .withf(|vars| vars.query.ends_with(" language:Go"))
            .times(1)
            .returning(|_| Ok(one_repo(31)));

        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);

        let query = TrendingQuery::new("week", "Go");
        trending_run(&query, &source, &mut io, &now()).await.unwrap();

        let expected = "\nTrending repositories (by week)\n\n\
                        tcard/enumtag\n  \
                        https://github.com/tcard/enumtag\n  \
                        Package enumtag.\n  \
                        5 stars | 0 forks | \n\
                        \n\
                        And 30 more\n";
        assert_eq!(out.contents(), expected);
    }

    #[tokio::test]
    async fn test_terminal_width_truncates_repository_lines() {
        let mut source = MockTrendingSource::new();
        source.expect_search().times(1).returning(|_| Ok(one_repo(1)));

        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);
        io.set_terminal_width(20);

        trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap();

        let expected = "\nTrending repositories (by day)\n\n\
                        tcard/enumtag\n  \
                        https://github.co…\n  \
                        Package enumtag.\n  \
                        5 stars | 0 forks…\n\
                        \n";
        assert_eq!(out.contents(), expected);
    }

    #[tokio::test]
    async fn test_colors_follow_the_streams() {
        let mut source = MockTrendingSource::new();
        source.expect_search().times(2).returning(|_| Ok(one_repo(3)));

        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);
        io.set_color_enabled(true);
        trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap();

        let colors = ColorScheme::new(true);
        let output = out.contents();
        assert!(output.contains(&colors.green("tcard/enumtag")));
        assert!(output.contains(&colors.gray("And 2 more")));

        let (mut io, out) = IoStreams::test();
        io.set_stdout_tty(true);
        io.set_color_enabled(false);
        trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap();

        assert!(out.contents().contains("\ntcard/enumtag\n"));
        assert!(out.contents().ends_with("\nAnd 2 more\n"));
    }

    #[tokio::test]
    async fn test_pipe_gets_no_title_or_notice() {
        let mut source = MockTrendingSource::new();
        source.expect_search().times(1).returning(|_| Ok(one_repo(31)));

        let (mut io, out) = IoStreams::test();
        trending_run(&TrendingQuery::default(), &source, &mut io, &now())
            .await
            .unwrap();

        let output = out.contents();
        assert!(output.starts_with("tcard/enumtag\n"));
        assert!(!output.contains("Trending repositories"));
        assert!(!output.contains("more"));
    }
}
