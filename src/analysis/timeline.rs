use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};

use crate::error::Result;
use crate::github::GitHubApi;
use crate::models::{CommitDay, EventKind, GitHubEvent};

pub const TIMELINE_DAYS: usize = 30;

/// Daily commit counts for the trailing 30 days, from recent push events.
pub struct CommitTimelineBuilder {
    github: Arc<dyn GitHubApi>,
}

impl CommitTimelineBuilder {
    pub fn new(github: impl GitHubApi + 'static) -> Self {
        Self::with_shared(Arc::new(github))
    }

    pub fn with_shared(github: Arc<dyn GitHubApi>) -> Self {
        Self { github }
    }

    pub async fn build_commit_timeline(&self, username: &str) -> Result<Vec<CommitDay>> {
        tracing::info!("Building commit timeline for: {}", username);
        let events = self.github.get_user_events(username).await?;
        Ok(commit_timeline(&events, Utc::now().date_naive()))
    }
}

/// Buckets push events into `[today - 29, today]` (UTC days), oldest first.
/// Other event kinds and pushes outside the window are ignored.
pub fn commit_timeline(events: &[GitHubEvent], today: NaiveDate) -> Vec<CommitDay> {
    let start = today - Duration::days(TIMELINE_DAYS as i64 - 1);

    let mut days: Vec<CommitDay> = (0..TIMELINE_DAYS as i64)
        .map(|offset| {
            let day = start + Duration::days(offset);
            CommitDay {
                date: day.format("%b %-d").to_string(),
                day,
                count: 0,
            }
        })
        .collect();

    for event in events.iter().filter(|e| e.kind() == EventKind::Push) {
        let offset = (event.created_at.date_naive() - start).num_days();
        if (0..TIMELINE_DAYS as i64).contains(&offset) {
            days[offset as usize].count += event.commit_count();
        }
    }

    days
}
