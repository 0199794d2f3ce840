use crate::models::{ActivityEvent, EventKind, GitHubEvent};

pub const RECENT_ACTIVITY_LIMIT: usize = 10;
const UNTITLED: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySummary {
    pub pull_requests: u32,
    pub issues_contributed: u32,
    pub reviews: u32,
    pub watched: u32,
    /// First `RECENT_ACTIVITY_LIMIT` recognized events, in upstream order.
    pub recent: Vec<ActivityEvent>,
}

/// Counts every recognized event, then keeps only the head of the feed.
pub fn summarize_activity(events: &[GitHubEvent]) -> ActivitySummary {
    let mut summary = ActivitySummary::default();

    for event in events {
        let repo = event.repo_name();
        let date = event.created_at;
        let action = || event.payload.action.clone().unwrap_or_default();

        let activity = match event.kind() {
            EventKind::Push => ActivityEvent::Commit { repo, date },
            EventKind::PullRequest => {
                summary.pull_requests += 1;
                ActivityEvent::PullRequest {
                    repo,
                    action: action(),
                    date,
                    title: title_of(event.payload.pull_request.as_ref().and_then(|p| p.title.clone())),
                }
            }
            EventKind::Issues => {
                summary.issues_contributed += 1;
                ActivityEvent::Issue {
                    repo,
                    action: action(),
                    date,
                    title: title_of(event.payload.issue.as_ref().and_then(|i| i.title.clone())),
                }
            }
            EventKind::PullRequestReview => {
                summary.reviews += 1;
                ActivityEvent::Review {
                    repo,
                    action: action(),
                    date,
                }
            }
            EventKind::Watch => {
                summary.watched += 1;
                ActivityEvent::Watch { repo, date }
            }
            EventKind::Other => continue,
        };

        summary.recent.push(activity);
    }

    summary.recent.truncate(RECENT_ACTIVITY_LIMIT);
    summary
}

fn title_of(title: Option<String>) -> String {
    title.filter(|t| !t.is_empty()).unwrap_or_else(|| UNTITLED.to_string())
}
