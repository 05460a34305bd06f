// GraphQL wire types for the trending search
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::github::{GitHubError, Result};

/// The one query we send. Only repository fields the table shows are requested.
pub const TRENDING_REPOSITORIES_QUERY: &str = r#"query TrendingRepositories($query: String!, $type: SearchType!, $first: Int!) {
  search(query: $query, type: $type, first: $first) {
    repositoryCount
    nodes {
      ... on Repository {
        name
        url
        description
        stargazerCount
        forkCount
        owner {
          login
        }
        primaryLanguage {
          name
        }
      }
    }
  }
}"#;

/// Variables for `TrendingRepositories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchVariables {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: String,
    pub first: u32,
}

/// Request body - GitHub wants `{"query": ..., "variables": {...}}`
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: &'a V,
}

/// Response envelope. A 200 can still carry errors instead of data.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingSearchData {
    pub search: SearchConnection,
}

/// The `search` connection. `repositoryCount` is the server-side total,
/// `nodes` is just the first page of it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConnection {
    pub repository_count: u64,
    #[serde(default)]
    pub nodes: Vec<RepositoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub name: String,
    pub url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazer_count: u64,
    #[serde(default)]
    pub fork_count: u64,
    pub owner: RepositoryOwner,
    pub primary_language: Option<PrimaryLanguage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryLanguage {
    pub name: String,
}

/// Decode a GraphQL response body into its `data` payload
///
/// Errors reported by the server win over partial data.
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)?;

    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        return Err(GitHubError::GraphQl(messages.join("; ")));
    }

    response.data.ok_or(GitHubError::MissingData)
}
