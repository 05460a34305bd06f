// GitHub provider implementation - bridges API client with TrendingSource trait
use async_trait::async_trait;
use trendscout_api::{GitHubClient, SearchConnection, SearchVariables};

use crate::{search::TrendingSource, Result};

/// Wrapper around GitHubClient that implements TrendingSource
pub struct GitHubProvider {
    client: GitHubClient,
}

impl GitHubProvider {
    pub fn new(token: Option<String>, host: &str) -> Result<Self> {
        Ok(Self {
            client: GitHubClient::new(token, host)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

#[async_trait]
impl TrendingSource for GitHubProvider {
    async fn search(&self, variables: &SearchVariables) -> Result<SearchConnection> {
        Ok(self.client.search_trending(variables).await?)
    }
}
