use std::sync::Arc;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;

use crate::analysis::scoring_engine::ScoringEngine;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::github::ProfileSource;
use crate::models::{
    language_histogram, AnalysisReport, Event, ProfileBundle, ReadmeInfo, RepoDetail, Repository,
    DETAIL_REPO_LIMIT,
};

/// Worst case per inspected repo: one root listing plus one README body.
const REQUESTS_PER_REPO: usize = 2;

pub struct AnalysisPipeline {
    source: Arc<dyn ProfileSource>,
    engine: ScoringEngine,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(source: impl ProfileSource + 'static, config: PipelineConfig) -> Self {
        Self::with_source(Arc::new(source), config)
    }

    pub fn with_source(source: Arc<dyn ProfileSource>, config: PipelineConfig) -> Self {
        Self {
            source,
            engine: ScoringEngine::new(),
            config,
        }
    }

    pub async fn analyze_user(&self, username: &str) -> Result<AnalysisReport> {
        let bundle = self.fetch_bundle(username).await?;
        self.analyze_bundle(bundle, Utc::now())
    }

    pub fn analyze_bundle(&self, bundle: ProfileBundle, now: DateTime<Utc>) -> Result<AnalysisReport> {
        self.engine.analyze_bundle(bundle, now)
    }

    pub async fn fetch_bundle(&self, username: &str) -> Result<ProfileBundle> {
        // Step 1: Profile, repositories and events are independent
        tracing::info!("Fetching GitHub data for {} via {}", username, self.source.name());
        let (profile, repos, events) = tokio::try_join!(
            self.source.get_user(username),
            self.source.get_user_repos(username),
            self.fetch_events(username),
        )?;
        tracing::info!(
            "Found {} repositories and {} recent events",
            repos.len(),
            events.len()
        );

        // Step 2: README and .gitignore checks on the most recently updated repos
        let top_repos = &repos[..repos.len().min(DETAIL_REPO_LIMIT)];
        if let Some(short) = quota_shortfall(self.source.remaining_quota(), top_repos.len()) {
            tracing::warn!(
                "GitHub quota is {} request(s) short for checking {} repos; some checks will report missing files",
                short,
                top_repos.len()
            );
        }
        let repo_details = self.inspect_repos(&profile.login, top_repos).await;

        // Step 3: Language histogram over every repository
        let languages = language_histogram(&repos);

        Ok(ProfileBundle {
            profile,
            repos,
            repo_details,
            events,
            languages,
        })
    }

    async fn fetch_events(&self, username: &str) -> Result<Vec<Event>> {
        match self
            .source
            .get_user_events(username, self.config.max_events)
            .await
        {
            Ok(events) => Ok(events),
            Err(e) => {
                tracing::warn!("Could not fetch events for {}: {}", username, e);
                Ok(Vec::new())
            }
        }
    }

    async fn inspect_repos(&self, owner: &str, repos: &[Repository]) -> Vec<RepoDetail> {
        let semaphore = Semaphore::new(self.config.concurrency_limit.max(1));

        let pb = ProgressBar::new(repos.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
        {
            pb.set_style(style.progress_chars("#>-"));
        }

        let checks = repos.iter().map(|repo| {
            let semaphore = &semaphore;
            let pb = &pb;
            async move {
                let _permit = semaphore.acquire().await;
                let detail = self.inspect_repo(owner, repo).await;
                pb.inc(1);
                detail
            }
        });

        let details = join_all(checks).await;
        pb.finish_with_message("Checked repositories");
        details
    }

    /// Failures here count as absence; they never abort the analysis.
    async fn inspect_repo(&self, owner: &str, repo: &Repository) -> RepoDetail {
        let entries = match self.source.get_root_entries(owner, &repo.name).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Could not list {}/{}: {}", owner, repo.name, e);
                Vec::new()
            }
        };

        let names: Vec<String> = entries.iter().map(|e| e.name.to_lowercase()).collect();
        let has_gitignore = names.iter().any(|n| n == ".gitignore");
        let lists_readme = names.iter().any(|n| n == "readme.md" || n == "readme");

        // Only spend a request on the README body when the listing shows one
        let readme = if lists_readme {
            match self.source.get_readme(owner, &repo.name).await {
                Ok(Some(content)) => ReadmeInfo::from_content(&content),
                Ok(None) => ReadmeInfo::missing(),
                Err(e) => {
                    tracing::warn!("Could not fetch README of {}/{}: {}", owner, repo.name, e);
                    ReadmeInfo::missing()
                }
            }
        } else {
            ReadmeInfo::missing()
        };

        tracing::debug!(
            "{}: readme={} ({} chars), gitignore={}",
            repo.name,
            readme.exists,
            readme.length,
            has_gitignore
        );

        RepoDetail::new(repo, readme, has_gitignore)
    }
}

/// How many requests the enrichment phase may lack, given the last known quota.
fn quota_shortfall(remaining: Option<u32>, repo_count: usize) -> Option<usize> {
    let needed = repo_count * REQUESTS_PER_REPO;
    let remaining = remaining? as usize;
    (remaining < needed).then(|| needed - remaining)
}
