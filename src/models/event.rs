use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public activity event from `GET /users/{username}/events`.
///
/// `created_at` is required; events without a timestamp are dropped when the
/// list is decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubEvent {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub repo: Option<EventRepo>,
    #[serde(default)]
    pub payload: EventPayload,
    pub created_at: DateTime<Utc>,
}

impl GitHubEvent {
    pub fn kind(&self) -> EventKind {
        self.kind.as_deref().map(EventKind::from).unwrap_or(EventKind::Other)
    }

    pub fn repo_name(&self) -> String {
        self.repo.as_ref().map(|r| r.name.clone()).unwrap_or_default()
    }

    /// Commits carried by a push: the `commits` list, else `size`, which is
    /// GitHub's declared commit count for the push. Zero when neither is present.
    pub fn commit_count(&self) -> u32 {
        match (&self.payload.commits, self.payload.size) {
            (Some(commits), _) => commits.len() as u32,
            (None, Some(size)) => size,
            (None, None) => 0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    pub action: Option<String>,
    pub size: Option<u32>,
    pub commits: Option<Vec<serde_json::Value>>,
    pub pull_request: Option<TitledItem>,
    pub issue: Option<TitledItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledItem {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    Issues,
    PullRequestReview,
    Watch,
    Other,
}

impl From<&str> for EventKind {
    fn from(s: &str) -> Self {
        match s {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issues,
            "PullRequestReviewEvent" => EventKind::PullRequestReview,
            "WatchEvent" => EventKind::Watch,
            _ => EventKind::Other,
        }
    }
}

/// Normalized entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    Commit {
        repo: String,
        date: DateTime<Utc>,
    },
    PullRequest {
        repo: String,
        action: String,
        date: DateTime<Utc>,
        title: String,
    },
    Issue {
        repo: String,
        action: String,
        date: DateTime<Utc>,
        title: String,
    },
    Review {
        repo: String,
        action: String,
        date: DateTime<Utc>,
    },
    Watch {
        repo: String,
        date: DateTime<Utc>,
    },
}

impl ActivityEvent {
    pub fn repo(&self) -> &str {
        match self {
            ActivityEvent::Commit { repo, .. }
            | ActivityEvent::PullRequest { repo, .. }
            | ActivityEvent::Issue { repo, .. }
            | ActivityEvent::Review { repo, .. }
            | ActivityEvent::Watch { repo, .. } => repo,
        }
    }

    pub fn date(&self) -> DateTime<Utc> {
        match self {
            ActivityEvent::Commit { date, .. }
            | ActivityEvent::PullRequest { date, .. }
            | ActivityEvent::Issue { date, .. }
            | ActivityEvent::Review { date, .. }
            | ActivityEvent::Watch { date, .. } => *date,
        }
    }

    /// One-line description for text output.
    pub fn describe(&self) -> String {
        match self {
            ActivityEvent::Commit { repo, .. } => format!("Pushed commits to {}", repo),
            ActivityEvent::PullRequest { repo, action, title, .. } => {
                format!("Pull request {} in {}: {}", action, repo, title)
            }
            ActivityEvent::Issue { repo, action, title, .. } => {
                format!("Issue {} in {}: {}", action, repo, title)
            }
            ActivityEvent::Review { repo, action, .. } => format!("Review {} in {}", action, repo),
            ActivityEvent::Watch { repo, .. } => format!("Starred {}", repo),
        }
    }
}
