pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;
pub mod output;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use github::{GitHubApi, GitHubClient};
pub use analysis::{CommitTimelineBuilder, ProfileAggregator};
pub use output::Report;
