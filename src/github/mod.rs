pub mod api;
pub mod client;

pub use api::GitHubApi;
pub use client::{validate_username, GitHubClient};
