// Core business logic for `trendscout trending`
pub mod command;
pub mod config;
pub mod display;
pub mod error;
pub mod iostreams;
pub mod models;
pub mod providers;
pub mod range;
pub mod search;
pub mod table;
pub mod trending;

pub use command::trending_run;
pub use config::{ColorMode, Config};
pub use error::Error;
pub use iostreams::{ColorScheme, IoStreams, PagerGuard};
pub use models::{RepositorySummary, TrendingPage};
pub use providers::GitHubProvider;
pub use range::{resolve_range, TrendWindow};
pub use search::TrendingSource;
pub use trending::{fetch_trending, TrendingQuery};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
