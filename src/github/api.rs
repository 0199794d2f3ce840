use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DirectoryEntry, GitHubEvent, GitHubUser, Repository};

/// Read-only GitHub endpoints the pipelines consume. Each list endpoint
/// returns the first page only (up to 100 items).
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<GitHubUser>;
    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>>;
    async fn get_user_events(&self, username: &str) -> Result<Vec<GitHubEvent>>;
    async fn get_user_starred(&self, username: &str) -> Result<Vec<Repository>>;
    async fn get_repo_contents(&self, owner: &str, repo: &str) -> Result<Vec<DirectoryEntry>>;
}
