use crate::Result;
use trendscout_api::{SearchConnection, SearchVariables};

/// Anything that can run a trending search
///
/// GitHub is the real implementation. Tests swap in a mock or a fixture so
/// nothing needs a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait TrendingSource: Send + Sync {
    async fn search(&self, variables: &SearchVariables) -> Result<SearchConnection>;
}
