use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::str::FromStr;

pub const NO_DESCRIPTION: &str = "No description provided";
pub const NO_LANGUAGE: &str = "Not specified";
pub const NO_LICENSE: &str = "None";
pub const DEFAULT_BRANCH: &str = "main";

/// Repository as listed by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub name: String,
    pub full_name: Option<String>,
    pub owner: Option<RepositoryOwner>,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u32>,
    pub forks_count: Option<u32>,
    pub watchers_count: Option<u32>,
    pub open_issues_count: Option<u32>,
    pub size: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: Option<String>,
    pub homepage: Option<String>,
    pub has_issues: Option<bool>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_pages: Option<bool>,
    pub archived: Option<bool>,
    pub disabled: Option<bool>,
    pub visibility: Option<String>,
    pub license: Option<License>,
    pub default_branch: Option<String>,
}

impl Repository {
    pub fn stars(&self) -> u32 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn forks(&self) -> u32 {
        self.forks_count.unwrap_or(0)
    }

    /// Owner login, falling back to the prefix of `full_name`.
    pub fn owner_login(&self) -> Option<&str> {
        self.owner
            .as_ref()
            .map(|o| o.login.as_str())
            .filter(|l| !l.is_empty())
            .or_else(|| {
                self.full_name
                    .as_deref()
                    .and_then(|full| full.split_once('/'))
                    .map(|(owner, _)| owner)
            })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct License {
    pub name: Option<String>,
}

/// One entry of `GET /repos/{owner}/{repo}/contents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryEntry {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    pub path: Option<String>,
}

impl DirectoryEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySummary {
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub forks: u32,
    pub language: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub url: String,
    pub homepage: String,
    pub size: u64,
    pub watchers_count: u32,
    pub open_issues_count: u32,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub archived: bool,
    pub disabled: bool,
    pub visibility: String,
    pub license: String,
    pub default_branch: String,
    pub file_count: usize,
    pub frameworks: Vec<String>,
}

impl RepositorySummary {
    pub fn new(repo: &Repository, file_count: usize, frameworks: Vec<String>) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            stars: repo.stars(),
            forks: repo.forks(),
            language: repo
                .language
                .clone()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| NO_LANGUAGE.to_string()),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at: repo.pushed_at,
            url: repo.html_url.clone().unwrap_or_default(),
            homepage: repo.homepage.clone().unwrap_or_default(),
            size: repo.size.unwrap_or(0),
            watchers_count: repo.watchers_count.unwrap_or(0),
            open_issues_count: repo.open_issues_count.unwrap_or(0),
            has_issues: repo.has_issues.unwrap_or(false),
            has_projects: repo.has_projects.unwrap_or(false),
            has_wiki: repo.has_wiki.unwrap_or(false),
            has_pages: repo.has_pages.unwrap_or(false),
            archived: repo.archived.unwrap_or(false),
            disabled: repo.disabled.unwrap_or(false),
            visibility: repo.visibility.clone().unwrap_or_default(),
            license: repo
                .license
                .as_ref()
                .and_then(|l| l.name.clone())
                .unwrap_or_else(|| NO_LICENSE.to_string()),
            default_branch: repo
                .default_branch
                .clone()
                .filter(|b| !b.is_empty())
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            file_count,
            frameworks,
        }
    }
}

/// Presentation orderings for a repository list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepoSort {
    #[default]
    Stars,
    Updated,
    Name,
    Created,
}

impl FromStr for RepoSort {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stars" => Ok(RepoSort::Stars),
            "updated" => Ok(RepoSort::Updated),
            "name" => Ok(RepoSort::Name),
            "created" | "newest" => Ok(RepoSort::Created),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

impl std::fmt::Display for RepoSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoSort::Stars => write!(f, "stars"),
            RepoSort::Updated => write!(f, "updated"),
            RepoSort::Name => write!(f, "name"),
            RepoSort::Created => write!(f, "created"),
        }
    }
}

/// Stable sort; missing timestamps sort last for the date orderings.
pub fn sort_repositories(repos: &mut [RepositorySummary], order: RepoSort) {
    match order {
        RepoSort::Stars => repos.sort_by_key(|r| Reverse(r.stars)),
        RepoSort::Updated => repos.sort_by_key(|r| Reverse(r.updated_at)),
        RepoSort::Name => repos.sort_by_key(|r| r.name.to_lowercase()),
        RepoSort::Created => repos.sort_by_key(|r| Reverse(r.created_at)),
    }
}
