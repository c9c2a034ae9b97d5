use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::user::{has_text, Event, GitHubUser, Repository};
use crate::error::{Error, Result};

/// Number of most-recently-updated repositories that get README/.gitignore checks.
pub const DETAIL_REPO_LIMIT: usize = 6;

/// Everything the scoring engine needs about one user, as fetched from GitHub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBundle {
    pub profile: GitHubUser,
    pub repos: Vec<Repository>,
    pub repo_details: Vec<RepoDetail>,
    pub events: Vec<Event>,
    pub languages: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeInfo {
    pub exists: bool,
    pub length: usize,
}

impl ReadmeInfo {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn from_content(content: &str) -> Self {
        Self {
            exists: true,
            length: content.chars().count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDetail {
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub language: Option<String>,
    pub html_url: String,
    pub fork: bool,
    pub readme: ReadmeInfo,
    #[serde(rename = "hasGitignore")]
    pub has_gitignore: bool,
}

impl RepoDetail {
    pub fn new(repo: &Repository, readme: ReadmeInfo, has_gitignore: bool) -> Self {
        Self {
            name: repo.name.clone(),
            description: repo.description.clone(),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            language: repo.language.clone(),
            html_url: repo.html_url.clone(),
            fork: repo.fork,
            readme,
            has_gitignore,
        }
    }

    pub fn has_description(&self) -> bool {
        has_text(self.description.as_deref())
    }
}

/// Count repositories per primary language across the full repo list.
pub fn language_histogram(repos: &[Repository]) -> BTreeMap<String, u32> {
    let mut languages = BTreeMap::new();
    for language in repos.iter().filter_map(|r| r.language.as_ref()) {
        *languages.entry(language.clone()).or_insert(0) += 1;
    }
    languages
}

impl ProfileBundle {
    pub fn total_repos(&self) -> usize {
        self.repos.len()
    }

    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// Check the structural shape the aggregator guarantees.
    pub fn validate(&self) -> Result<()> {
        let expected = self.repos.len().min(DETAIL_REPO_LIMIT);
        if self.repo_details.len() != expected {
            return Err(Error::InvalidBundle(format!(
                "expected {} repoDetails for {} repos, found {}",
                expected,
                self.repos.len(),
                self.repo_details.len()
            )));
        }

        for (index, (detail, repo)) in self.repo_details.iter().zip(&self.repos).enumerate() {
            if detail.name != repo.name {
                return Err(Error::InvalidBundle(format!(
                    "repoDetails[{}] is \"{}\" but repos[{}] is \"{}\"",
                    index, detail.name, index, repo.name
                )));
            }
            if !detail.readme.exists && detail.readme.length > 0 {
                return Err(Error::InvalidBundle(format!(
                    "repoDetails[{}] has a README length without a README",
                    index
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(name: &str, language: Option<&str>) -> Repository {
        Repository {
            id: 0,
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: 0,
            forks_count: 0,
            fork: false,
            html_url: String::new(),
            updated_at: None,
        }
    }

    fn bundle(repos: Vec<Repository>, detail_count: usize) -> ProfileBundle {
        let repo_details = repos
            .iter()
            .take(detail_count)
            .map(|r| RepoDetail::new(r, ReadmeInfo::missing(), false))
            .collect();
        ProfileBundle {
            profile: serde_json::from_str(
                r#"{"login": "octocat", "name": null, "bio": null, "created_at": "2011-01-25T18:44:36Z"}"#,
            )
            .unwrap(),
            languages: language_histogram(&repos),
            repos,
            repo_details,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_language_histogram_counts_full_repo_list() {
        let repos = vec![
            repo("a", Some("Rust")),
            repo("b", Some("Go")),
            repo("c", Some("Rust")),
            repo("d", None),
        ];
        let languages = language_histogram(&repos);
        assert_eq!(languages.len(), 2);
        assert_eq!(languages["Rust"], 2);
        assert_eq!(languages["Go"], 1);
    }

    #[test]
    fn test_readme_length_counts_chars() {
        let info = ReadmeInfo::from_content("héllo");
        assert!(info.exists);
        assert_eq!(info.length, 5);
    }

    #[test]
    fn test_validate_accepts_bounded_prefix() {
        let repos: Vec<_> = (0..9).map(|i| repo(&format!("r{}", i), None)).collect();
        assert!(bundle(repos, DETAIL_REPO_LIMIT).validate().is_ok());
        assert!(bundle(Vec::new(), 0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_wrong_detail_count() {
        let repos: Vec<_> = (0..9).map(|i| repo(&format!("r{}", i), None)).collect();
        let err = bundle(repos, 4).validate().unwrap_err();
        assert!(err.is_programming_error());
    }

    #[test]
    fn test_validate_rejects_mismatched_names() {
        let mut b = bundle(vec![repo("a", None), repo("b", None)], 2);
        b.repo_details.swap(0, 1);
        assert!(matches!(b.validate(), Err(Error::InvalidBundle(_))));
    }

    #[test]
    fn test_bundle_json_field_names() {
        let b = bundle(vec![repo("a", Some("Rust"))], 1);
        let json = serde_json::to_value(&b).unwrap();
        assert!(json.get("repoDetails").is_some());
        assert_eq!(json["repoDetails"][0]["hasGitignore"], false);
        assert_eq!(json["repoDetails"][0]["readme"]["exists"], false);
        assert_eq!(json["languages"]["Rust"], 1);
    }
}
