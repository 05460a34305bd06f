// Provider implementations for TrendingSource
pub mod github;

pub use github::GitHubProvider;
