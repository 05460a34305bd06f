// GitHub GraphQL client - the only place that talks to the network
pub mod github;
pub mod graphql;
pub mod instance;

// Re-export common types
pub use github::{GitHubClient, GitHubError, Result};
pub use graphql::{
    RepositoryNode, SearchConnection, SearchVariables, TrendingSearchData,
    TRENDING_REPOSITORIES_QUERY,
};
pub use instance::{graphql_endpoint, is_enterprise, normalize_host, DEFAULT_HOST};
