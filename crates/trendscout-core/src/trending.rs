// Trending repositories discovery
use crate::{
    models::{RepositorySummary, TrendingPage},
    range::resolve_range,
    search::TrendingSource,
    Result,
};
use chrono::{DateTime, TimeZone};
use std::fmt;
use tracing::{debug, info, warn};
use trendscout_api::SearchVariables;

/// Repositories are "trending" if they were created inside the window
pub const TRENDING_METHOD: &str = "created";

/// GraphQL `SearchType` we ask for
pub const SEARCH_TYPE: &str = "REPOSITORY";

/// One page, always. There is no "next".
pub const PAGE_SIZE: u32 = 30;

/// What the user asked for on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingQuery {
    pub window: String,
    /// Empty means any language
    pub language: String,
    pub method: String,
}

impl TrendingQuery {
    pub fn new(window: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            window: window.into(),
            language: language.into(),
            method: TRENDING_METHOD.to_string(),
        }
    }

    pub fn range_expression<Tz>(&self, now: &DateTime<Tz>) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        resolve_range(&self.method, &self.window, now)
    }
}

impl Default for TrendingQuery {
    fn default() -> Self {
        Self::new("day", "")
    }
}

/// Search text plus the fixed type and page size
pub fn search_variables(range_expr: &str, language: &str) -> SearchVariables {
    let mut query = range_expr.to_string();
    if !language.is_empty() {
        query.push_str(&format!(" language:{}", language));
    }

    SearchVariables {
        query,
        search_type: SEARCH_TYPE.to_string(),
        first: PAGE_SIZE,
    }
}

/// Fetch one page of trending repositories
///
/// Exactly one call into `source`. Server order is kept as-is.
pub async fn fetch_trending<S>(source: &S, range_expr: &str, language: &str) -> Result<TrendingPage>
where
    S: TrendingSource + ?Sized,
{
    let variables = search_variables(range_expr, language);
    debug!("Trending search query: {}", variables.query);

    let connection = source.search(&variables).await?;

    let items: Vec<RepositorySummary> = connection
        .nodes
        .into_iter()
        .map(RepositorySummary::from)
        .collect();

    let total = usize::try_from(connection.repository_count).unwrap_or(usize::MAX);
    if total < items.len() {
        warn!(
            "Server reported {} matches but returned {} repositories",
            total,
            items.len()
        );
    }

    info!("Fetched {} of {} trending repositories", items.len(), total);
    Ok(TrendingPage::new(items, total))
}
