use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API returned {status} {status_text} for {url}")]
    Http {
        status: u16,
        status_text: String,
        url: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to build profile ({step}): {source}")]
    ProfileBuild {
        step: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("Invalid GitHub username: {0:?}")]
    InvalidUsername(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wraps a failed sub-fetch of the profile build.
    pub fn profile_build(step: &'static str, source: Error) -> Self {
        Error::ProfileBuild {
            step,
            source: Box::new(source),
        }
    }

    /// HTTP status of the underlying failure, looking through `ProfileBuild`.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::ProfileBuild { source, .. } => source.status(),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Single line shown to the user when a pipeline fails.
    pub fn user_message(&self) -> String {
        match self.status() {
            Some(404) => "User not found. Check the username and try again.".to_string(),
            Some(403) | Some(429) => {
                "GitHub API rate limit exceeded. Set GITHUB_TOKEN or try again later.".to_string()
            }
            _ => self.to_string(),
        }
    }
}
