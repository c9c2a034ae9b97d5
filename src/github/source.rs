use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ContentEntry, Event, GitHubUser, Repository};

/// Where the pipeline gets raw profile data from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<GitHubUser>;
    /// Repositories, most recently updated first.
    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>>;
    async fn get_user_events(&self, username: &str, max_events: u32) -> Result<Vec<Event>>;
    async fn get_root_entries(&self, owner: &str, repo: &str) -> Result<Vec<ContentEntry>>;
    /// Raw README text, or `None` when the repository has none.
    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Option<String>>;
    /// Requests left in the current quota window, if the source tracks one.
    fn remaining_quota(&self) -> Option<u32> {
        None
    }
    fn name(&self) -> &str;
}
