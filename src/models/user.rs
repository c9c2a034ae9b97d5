use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: String,
    pub bio: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    #[serde(default)]
    pub following: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub html_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.map(|v| !v.trim().is_empty()).unwrap_or(false)
}

pub const PUSH_EVENT: &str = "PushEvent";

/// A public activity event. Only the tag and timestamp matter for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_push(&self) -> bool {
        self.event_type == PUSH_EVENT
    }
}

/// An entry of a repository directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_github_repository() {
        let json = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "description": "This your first repo!",
            "language": "Ruby",
            "stargazers_count": 80,
            "forks_count": 9,
            "fork": false,
            "html_url": "https://github.com/octocat/Hello-World",
            "updated_at": "2011-01-26T19:14:43Z",
            "watchers_count": 80
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.stargazers_count, 80);
        assert!(has_text(repo.description.as_deref()));
    }

    #[test]
    fn test_blank_description_is_missing() {
        let json = r#"{"name": "x", "description": "   ", "language": null}"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert!(!has_text(repo.description.as_deref()));
    }

    #[test]
    fn test_event_is_push() {
        let json = r#"{"id": "1", "type": "PushEvent", "created_at": "2024-01-01T10:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.is_push());

        let json = r#"{"type": "WatchEvent", "created_at": "2024-01-01T10:00:00Z"}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(!event.is_push());
    }
}
