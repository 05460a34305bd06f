use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::graphql::{
    parse_response, GraphQlRequest, SearchConnection, SearchVariables, TrendingSearchData,
    TRENDING_REPOSITORIES_QUERY,
};
use crate::instance::graphql_endpoint;

const USER_AGENT: &str = concat!("trendscout/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication required. Set GH_TOKEN or add a token to the config file")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("GraphQL response contained no data")]
    MissingData,
}

impl GitHubError {
    /// True when the request never produced a usable HTTP exchange
    /// (connection problems, bad status codes). False when the server
    /// answered but we couldn't make sense of what it said.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GitHubError::RequestFailed(_)
                | GitHubError::RateLimitExceeded
                | GitHubError::AuthRequired
                | GitHubError::NetworkError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// GitHub GraphQL client bound to a single instance
pub struct GitHubClient {
    client: reqwest::Client,
    token: Option<String>,
    endpoint: String,
}

impl GitHubClient {
    pub fn new(token: Option<String>, host: &str) -> Result<Self> {
        Self::with_endpoint(token, graphql_endpoint(host))
    }

    /// Point the client at an explicit GraphQL URL (proxies, local test servers)
    pub fn with_endpoint(token: Option<String>, endpoint: String) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run the trending search and hand back the raw connection
    pub async fn search_trending(&self, variables: &SearchVariables) -> Result<SearchConnection> {
        let data: TrendingSearchData = self.graphql(TRENDING_REPOSITORIES_QUERY, variables).await?;
        Ok(data.search)
    }

    /// POST a GraphQL document and decode its `data`
    ///
    /// One round trip, no retries. Whatever the transport does is what you get.
    pub async fn graphql<V, T>(&self, query: &str, variables: &V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = GraphQlRequest { query, variables };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref token) = self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("bearer {}", token));
        }

        debug!("POST {}", self.endpoint);
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GitHubError::AuthRequired);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS || is_rate_limited(&response) {
            return Err(GitHubError::RateLimitExceeded);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GitHubError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        parse_response(&text)
    }
}

/// GitHub signals primary rate limits as a 403 with zero remaining quota
fn is_rate_limited(response: &reqwest::Response) -> bool {
    response.status() == reqwest::StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            == Some("0")
}
