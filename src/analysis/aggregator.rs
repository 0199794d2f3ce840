use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::activity::summarize_activity;
use crate::analysis::metrics::{account_age_years, round_to, LanguageTally, RepoTotals};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::GitHubApi;
use crate::models::{
    DirectoryEntry, ExperienceLevel, GitHubEvent, GitHubUser, Profile, Repository,
    RepositorySummary,
};
use crate::taxonomy::detect_frameworks;

pub const TOP_REPOS_LIMIT: usize = 5;

/// Everything fetched for one profile build, before any derivation.
#[derive(Debug, Clone, Default)]
pub struct UpstreamSnapshot {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    /// Root listing per repository, aligned by index with `repositories`.
    pub listings: Vec<Vec<DirectoryEntry>>,
    pub events: Vec<GitHubEvent>,
    pub starred: Option<usize>,
}

pub struct ProfileAggregator {
    github: Arc<dyn GitHubApi>,
    config: PipelineConfig,
}

impl ProfileAggregator {
    pub fn new(github: impl GitHubApi + 'static, config: PipelineConfig) -> Self {
        Self::with_shared(Arc::new(github), config)
    }

    pub fn with_shared(github: Arc<dyn GitHubApi>, config: PipelineConfig) -> Self {
        Self { github, config }
    }

    /// Fetches and merges one user's public footprint. Failure of the user,
    /// repositories or events fetch fails the build; directory listings and
    /// starred repositories are best-effort.
    pub async fn build_profile(&self, username: &str) -> Result<Profile> {
        tracing::info!("Building profile for: {}", username);

        let (user, repositories, events, starred) = tokio::try_join!(
            async {
                self.github
                    .get_user(username)
                    .await
                    .map_err(|e| Error::profile_build("user", e))
            },
            async {
                self.github
                    .get_user_repos(username)
                    .await
                    .map_err(|e| Error::profile_build("repositories", e))
            },
            async {
                self.github
                    .get_user_events(username)
                    .await
                    .map_err(|e| Error::profile_build("events", e))
            },
            async { Ok::<_, Error>(self.fetch_starred(username).await) },
        )?;

        tracing::info!(
            "Found {} repositories and {} events",
            repositories.len(),
            events.len()
        );

        let listings = self.fetch_listings(username, &repositories).await;

        let snapshot = UpstreamSnapshot {
            user,
            repositories,
            listings,
            events,
            starred,
        };

        Ok(assemble_profile(snapshot, Utc::now()))
    }

    async fn fetch_starred(&self, username: &str) -> Option<usize> {
        match self.github.get_user_starred(username).await {
            Ok(starred) => Some(starred.len()),
            Err(e) => {
                tracing::warn!("Starred repositories unavailable for {}: {}", username, e);
                None
            }
        }
    }

    /// Root listings fetched with bounded concurrency; a failed listing is
    /// replaced by an empty one. Output order matches `repos`.
    async fn fetch_listings(&self, username: &str, repos: &[Repository]) -> Vec<Vec<DirectoryEntry>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency_limit.max(1)));
        let pb = self.progress_bar(repos.len() as u64);

        let listing_futures = repos.iter().map(|repo| {
            let github = Arc::clone(&self.github);
            let sem = Arc::clone(&semaphore);
            let owner = repo.owner_login().unwrap_or(username).to_string();
            let name = repo.name.clone();
            let pb = pb.clone();

            async move {
                if name.is_empty() {
                    pb.inc(1);
                    return Vec::new();
                }

                let _permit = sem.acquire().await.ok();
                let listing = match github.get_repo_contents(&owner, &name).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        tracing::warn!("Root listing unavailable for {}/{}: {}", owner, name, e);
                        Vec::new()
                    }
                };

                pb.inc(1);
                listing
            }
        });

        let listings = join_all(listing_futures).await;
        pb.finish_and_clear();
        listings
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// Derives the profile from fetched data. Deterministic apart from `now`.
pub fn assemble_profile(snapshot: UpstreamSnapshot, now: DateTime<Utc>) -> Profile {
    let UpstreamSnapshot {
        user,
        repositories: repos,
        listings,
        events,
        starred,
    } = snapshot;

    let mut totals = RepoTotals::default();
    let mut languages = LanguageTally::default();
    let mut frameworks: Vec<String> = Vec::new();
    let mut has_collaborative_projects = false;
    let mut repositories = Vec::with_capacity(repos.len());

    for (index, repo) in repos.iter().enumerate() {
        totals.stars += u64::from(repo.stars());
        totals.forks += u64::from(repo.forks());
        totals.size_kb += repo.size.unwrap_or(0);
        totals.open_issues += u64::from(repo.open_issues_count.unwrap_or(0));
        totals.watchers += u64::from(repo.watchers_count.unwrap_or(0));

        if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
            languages.add(language);
        }

        if repo.stars() > 0 || repo.forks() > 0 {
            has_collaborative_projects = true;
        }

        let listing = listings.get(index).map(Vec::as_slice).unwrap_or_default();
        let mut repo_frameworks = Vec::new();
        for framework in detect_frameworks(listing) {
            push_unique(&mut repo_frameworks, framework);
            push_unique(&mut frameworks, framework);
        }

        repositories.push(RepositorySummary::new(repo, listing.len(), repo_frameworks));
    }

    let mut top_repos = repositories.clone();
    top_repos.sort_by(|a, b| b.stars.cmp(&a.stars));
    top_repos.truncate(TOP_REPOS_LIMIT);

    let activity = summarize_activity(&events);

    let age = account_age_years(user.created_at, now);
    let experience_level = ExperienceLevel::from_account_age(age);

    let username = user.login.unwrap_or_default();
    let name = user
        .name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| username.clone());

    Profile {
        name,
        username,
        bio: user.bio.unwrap_or_default(),
        email: user.email.unwrap_or_default(),
        location: user.location.unwrap_or_default(),
        company: user.company.unwrap_or_default(),
        blog: user.blog.unwrap_or_default(),
        twitter_username: user.twitter_username.unwrap_or_default(),
        account_type: user.account_type.unwrap_or_default(),
        site_admin: user.site_admin.unwrap_or(false),
        hireable: user.hireable,
        public_repos: user.public_repos.unwrap_or(0),
        public_gists: user.public_gists.unwrap_or(0),
        followers: user.followers.unwrap_or(0),
        following: user.following.unwrap_or(0),
        created_at: user.created_at,
        updated_at: user.updated_at,
        avatar_url: user.avatar_url.unwrap_or_default(),
        gravatar_id: user.gravatar_id.unwrap_or_default(),
        html_url: user.html_url.unwrap_or_default(),
        total_stars: totals.stars,
        total_forks: totals.forks,
        total_size_kb: totals.size_kb,
        total_open_issues: totals.open_issues,
        total_watchers: totals.watchers,
        total_pull_requests: activity.pull_requests,
        total_issues_contributed: activity.issues_contributed,
        total_reviews: activity.reviews,
        total_watched: activity.watched,
        total_starred: starred,
        languages: languages.into_stats(),
        frameworks,
        top_repos,
        repositories,
        recent_activity: activity.recent,
        has_collaborative_projects,
        experience_level,
        account_age_years: round_to(age, 1),
    }
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}
