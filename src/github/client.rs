use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::api::GitHubApi;
use crate::models::{DirectoryEntry, GitHubEvent, GitHubUser, Repository};

pub const PER_PAGE: u32 = 100;
const MAX_USERNAME_LEN: usize = 39;

/// Usernames are interpolated into URL paths, so only ASCII letters, digits
/// and hyphens are accepted.
pub fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidUsername(username.to_string()))
    }
}

pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("devprofile/0.1"),
        );
        if let Some(token) = &config.github_token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `path` and decode the body as JSON. Non-2xx statuses become
    /// `Error::Http`; transport failures and timeouts become `Error::Network`.
    pub async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("Fetching: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                url,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value = self.get_json(path).await?;
        Ok(decode_list(value, path))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Decodes a JSON array element by element. A non-array payload yields an
/// empty list and undecodable elements are skipped.
pub fn decode_list<T: DeserializeOwned>(value: Value, source: &str) -> Vec<T> {
    let Value::Array(items) = value else {
        tracing::warn!("Expected a list from {}, got another shape", source);
        return Vec::new();
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if decoded.len() < total {
        tracing::warn!(
            "Skipped {} malformed item(s) from {}",
            total - decoded.len(),
            source
        );
    }

    decoded
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        tracing::info!("Fetching user: {}", username);
        let value = self.get_json(&format!("/users/{}", username)).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        tracing::info!("Fetching repositories for: {}", username);
        self.get_list(&format!("/users/{}/repos?per_page={}", username, PER_PAGE))
            .await
    }

    async fn get_user_events(&self, username: &str) -> Result<Vec<GitHubEvent>> {
        tracing::info!("Fetching events for: {}", username);
        self.get_list(&format!("/users/{}/events?per_page={}", username, PER_PAGE))
            .await
    }

    async fn get_user_starred(&self, username: &str) -> Result<Vec<Repository>> {
        tracing::info!("Fetching starred repositories for: {}", username);
        self.get_list(&format!("/users/{}/starred?per_page={}", username, PER_PAGE))
            .await
    }

    async fn get_repo_contents(&self, owner: &str, repo: &str) -> Result<Vec<DirectoryEntry>> {
        tracing::debug!("Fetching root listing: {}/{}", owner, repo);
        self.get_list(&format!("/repos/{}/{}/contents", owner, repo))
            .await
    }
}
