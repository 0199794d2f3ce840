pub mod activity;
pub mod aggregator;
pub mod metrics;
pub mod timeline;

pub use activity::{summarize_activity, ActivitySummary};
pub use aggregator::{assemble_profile, ProfileAggregator, UpstreamSnapshot};
pub use timeline::{commit_timeline, CommitTimelineBuilder};
