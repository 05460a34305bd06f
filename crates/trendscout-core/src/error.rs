use thiserror::Error;
use trendscout_api::GitHubError;

/// All the ways a trending run can go wrong
///
/// Every one of these ends the invocation. Nothing here is retried.
#[derive(Error, Debug)]
pub enum Error {
    #[error("search range is not correct:'{0}'; try day, week, month or year")]
    InvalidWindow(String),

    #[error("{0}")]
    Transport(#[source] GitHubError),

    #[error("Unexpected API response: {0}")]
    Query(#[source] GitHubError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<GitHubError> for Error {
    fn from(err: GitHubError) -> Self {
        if err.is_transport() {
            Error::Transport(err)
        } else {
            Error::Query(err)
        }
    }
}
