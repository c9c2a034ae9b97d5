use serde::{Deserialize, Serialize};

use super::user::GitHubUser;

/// One dimension's score together with the counters it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore<D> {
    pub score: u8,
    pub details: D,
}

/// Details for a dimension that may have had nothing to inspect.
///
/// `Empty` serializes as `{}` so renderers see the same shape either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Details<T> {
    Counted(T),
    Empty {},
}

impl<T> Details<T> {
    pub fn counted(&self) -> Option<&T> {
        match self {
            Details::Counted(d) => Some(d),
            Details::Empty {} => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationDetails {
    pub repos_checked: usize,
    pub with_readme: usize,
    pub with_detailed_readme: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyDetails {
    pub push_events_last30_days: usize,
    pub active_days: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactDetails {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_repos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPracticesDetails {
    pub repos_checked: usize,
    pub with_gitignore: usize,
    pub with_description: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub documentation: DimensionScore<Details<DocumentationDetails>>,
    pub consistency: DimensionScore<ConsistencyDetails>,
    pub impact: DimensionScore<ImpactDetails>,
    pub best_practices: DimensionScore<Details<BestPracticesDetails>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCount {
    pub name: String,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::High => write!(f, "high"),
            Impact::Medium => write!(f, "medium"),
            Impact::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub total_score: u8,
    pub dimensions: Dimensions,
    pub top_languages: Vec<LanguageCount>,
    pub longest_streak: u32,
    pub total_repos: usize,
    pub strengths: Vec<String>,
    pub red_flags: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    pub fn tier(&self) -> ReadinessTier {
        ReadinessTier::from_score(self.total_score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessTier {
    RecruiterReady,
    GettingThere,
    NeedsWork,
}

impl ReadinessTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 75 => ReadinessTier::RecruiterReady,
            s if s >= 50 => ReadinessTier::GettingThere,
            _ => ReadinessTier::NeedsWork,
        }
    }
}

impl std::fmt::Display for ReadinessTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadinessTier::RecruiterReady => write!(f, "Recruiter-Ready"),
            ReadinessTier::GettingThere => write!(f, "Getting There"),
            ReadinessTier::NeedsWork => write!(f, "Needs Work"),
        }
    }
}

/// Payload handed to the transport layer: who was analyzed, and the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub user: GitHubUser,
    pub analysis: AnalysisResult,
}
