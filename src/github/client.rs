use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::github::source::ProfileSource;
use crate::models::{ContentEntry, Event, GitHubUser, Repository};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitready/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        if config.github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set, using the unauthenticated quota of 60 requests/hour");
        }
        Self::new(config.github_token.as_deref(), &config.api_base_url)
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        let response = ensure_success(response, &self.rate_limiter, username).await?;

        Ok(response.json().await?)
    }

    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?sort=updated", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(&url, 100, username).await
    }

    async fn get_user_events(&self, username: &str, max_events: u32) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching public events for: {}", username);
        paginator
            .fetch_limited(&url, max_events.min(100), max_events, username)
            .await
    }

    async fn get_root_entries(&self, owner: &str, repo: &str) -> Result<Vec<ContentEntry>> {
        let url = format!("{}/repos/{}/{}/contents/", self.base_url, owner, repo);
        tracing::debug!("Listing root of: {}/{}", owner, repo);

        let response = self.client.get(&url).send().await?;
        // Empty repositories have no contents at all
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let full_name = format!("{}/{}", owner, repo);
        let response = ensure_success(response, &self.rate_limiter, &full_name).await?;

        Ok(response.json().await?)
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Option<String>> {
        let url = format!("{}/repos/{}/{}/readme", self.base_url, owner, repo);
        tracing::debug!("Fetching README of: {}/{}", owner, repo);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github.raw")
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let full_name = format!("{}/{}", owner, repo);
        let response = ensure_success(response, &self.rate_limiter, &full_name).await?;

        Ok(Some(response.text().await?))
    }

    fn remaining_quota(&self) -> Option<u32> {
        self.rate_limiter.remaining()
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Map a non-success GitHub response onto the crate error taxonomy.
///
/// `subject` names what was requested; a 404 reports it as a missing user.
pub(crate) async fn ensure_success(
    response: Response,
    rate_limiter: &RateLimiter,
    subject: &str,
) -> Result<Response> {
    let snapshot = rate_limiter.update_from_response(&response);
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = rate_limiter.retry_after_secs(&snapshot);
        tracing::warn!("GitHub refused request for {} ({}), retry after {}s", subject, status, retry_after);
        return Err(Error::RateLimited(retry_after));
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::UserNotFound(subject.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request for {} failed: {} - {}",
        subject, status, body
    )))
}
