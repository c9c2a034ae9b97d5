use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Malformed profile bundle: {0}")]
    InvalidBundle(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The three failure kinds a caller of the analyzer ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    RateLimited { retry_after: u64 },
    InternalError,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UserNotFound(_) => ErrorKind::NotFound,
            Error::RateLimited(secs) => ErrorKind::RateLimited { retry_after: *secs },
            Error::GitHubApi(msg) if mentions_rate_limit(msg) => ErrorKind::RateLimited {
                retry_after: crate::github::rate_limiter::DEFAULT_RETRY_AFTER_SECS,
            },
            _ => ErrorKind::InternalError,
        }
    }

    /// Structural problems with a bundle are caller bugs, not runtime failures.
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Error::InvalidBundle(_))
    }

    pub fn user_message(&self, username: &str) -> String {
        match self.kind() {
            ErrorKind::NotFound => format!("GitHub user \"{}\" not found.", username),
            ErrorKind::RateLimited { retry_after } => format!(
                "GitHub API rate limit exceeded. Please try again in {} seconds, \
                 or set GITHUB_TOKEN for 5,000 requests/hour.",
                retry_after
            ),
            ErrorKind::InternalError => "Internal error during analysis.".to_string(),
        }
    }
}

fn mentions_rate_limit(msg: &str) -> bool {
    let lower = msg.to_lowercase();
    lower.contains("rate limit") || lower.contains("quota exhausted")
}
