use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::event::ActivityEvent;
use super::repository::RepositorySummary;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub bio: String,
    pub email: String,
    pub location: String,
    pub company: String,
    pub blog: String,
    pub twitter_username: String,
    pub account_type: String,
    pub site_admin: bool,
    pub hireable: Option<bool>,
    pub public_repos: u32,
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub avatar_url: String,
    pub gravatar_id: String,
    pub html_url: String,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_size_kb: u64,
    pub total_open_issues: u64,
    pub total_watchers: u64,
    pub total_pull_requests: u32,
    pub total_issues_contributed: u32,
    pub total_reviews: u32,
    pub total_watched: u32,
    /// Starred repositories on the first page; `None` when that fetch failed.
    pub total_starred: Option<usize>,
    pub languages: Vec<LanguageStat>,
    pub frameworks: Vec<String>,
    pub top_repos: Vec<RepositorySummary>,
    pub repositories: Vec<RepositorySummary>,
    pub recent_activity: Vec<ActivityEvent>,
    pub has_collaborative_projects: bool,
    pub experience_level: ExperienceLevel,
    pub account_age_years: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageStat {
    pub language: String,
    pub count: u32,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-level")]
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    /// Strict thresholds: more than 5 years is senior, more than 2 is mid-level.
    pub fn from_account_age(years: f64) -> Self {
        if years > 5.0 {
            ExperienceLevel::Senior
        } else if years > 2.0 {
            ExperienceLevel::MidLevel
        } else {
            ExperienceLevel::Junior
        }
    }
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "Junior"),
            ExperienceLevel::MidLevel => write!(f, "Mid-level"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

/// One bucket of the commit timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommitDay {
    /// Display label such as `Oct 5`.
    pub date: String,
    pub day: NaiveDate,
    pub count: u32,
}
