//! Rule-based strengths, red flags and recommendations.
//!
//! Each generator walks an ordered list of independent rules. A rule looks at
//! the scored dimensions and the raw bundle and contributes at most one item.

use crate::models::analysis::{Dimensions, Impact, Recommendation};
use crate::models::{ProfileBundle, RepoDetail};

pub const STRONG_DIMENSION_SCORE: u8 = 70;
pub const MAX_RECOMMENDATIONS: usize = 3;

pub const FALLBACK_STRENGTH: &str = "Keep building! Every new project strengthens your portfolio.";

pub struct EvidenceContext<'a> {
    pub dimensions: &'a Dimensions,
    pub bundle: &'a ProfileBundle,
}

impl<'a> EvidenceContext<'a> {
    pub fn new(dimensions: &'a Dimensions, bundle: &'a ProfileBundle) -> Self {
        Self { dimensions, bundle }
    }

    fn missing_readme(&self) -> Vec<&'a RepoDetail> {
        self.bundle.repo_details.iter().filter(|r| !r.readme.exists).collect()
    }

    fn missing_description(&self) -> Vec<&'a RepoDetail> {
        self.bundle.repo_details.iter().filter(|r| !r.has_description()).collect()
    }

    fn missing_gitignore(&self) -> Vec<&'a RepoDetail> {
        self.bundle.repo_details.iter().filter(|r| !r.has_gitignore).collect()
    }

    fn active_days(&self) -> usize {
        self.dimensions.consistency.details.active_days
    }

    fn total_stars(&self) -> u64 {
        self.dimensions.impact.details.total_stars
    }
}

fn join_names(repos: &[&RepoDetail]) -> String {
    repos
        .iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthRule {
    Documentation,
    Consistency,
    CommunityStars,
    LanguageDiversity,
    BestPractices,
    PortfolioSize,
}

impl StrengthRule {
    pub const ALL: [StrengthRule; 6] = [
        StrengthRule::Documentation,
        StrengthRule::Consistency,
        StrengthRule::CommunityStars,
        StrengthRule::LanguageDiversity,
        StrengthRule::BestPractices,
        StrengthRule::PortfolioSize,
    ];

    pub fn evaluate(&self, ctx: &EvidenceContext) -> Option<String> {
        let dims = ctx.dimensions;
        match self {
            StrengthRule::Documentation => (dims.documentation.score >= STRONG_DIMENSION_SCORE)
                .then(|| "Strong README documentation across repositories.".to_string()),
            StrengthRule::Consistency => (dims.consistency.score >= STRONG_DIMENSION_SCORE)
                .then(|| "Consistent coding activity over the past 30 days.".to_string()),
            StrengthRule::CommunityStars => {
                let stars = ctx.total_stars();
                (stars >= 10).then(|| {
                    format!(
                        "Projects have earned {} stars — visible community interest.",
                        stars
                    )
                })
            }
            StrengthRule::LanguageDiversity => {
                let count = ctx.bundle.language_count();
                (count >= 3)
                    .then(|| format!("Great language diversity — {} languages used.", count))
            }
            StrengthRule::BestPractices => (dims.best_practices.score >= STRONG_DIMENSION_SCORE)
                .then(|| "Good use of .gitignore and repo descriptions.".to_string()),
            StrengthRule::PortfolioSize => {
                let count = ctx.bundle.total_repos();
                (count >= 10).then(|| {
                    format!("Solid portfolio size with {} public repositories.", count)
                })
            }
        }
    }
}

pub fn generate_strengths(ctx: &EvidenceContext) -> Vec<String> {
    let strengths: Vec<String> = StrengthRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(ctx))
        .collect();

    if strengths.is_empty() {
        vec![FALLBACK_STRENGTH.to_string()]
    } else {
        strengths
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedFlagRule {
    MissingReadme,
    MissingDescription,
    LowActivity,
    MissingGitignore,
    NarrowLanguages,
}

impl RedFlagRule {
    pub const ALL: [RedFlagRule; 5] = [
        RedFlagRule::MissingReadme,
        RedFlagRule::MissingDescription,
        RedFlagRule::LowActivity,
        RedFlagRule::MissingGitignore,
        RedFlagRule::NarrowLanguages,
    ];

    pub fn evaluate(&self, ctx: &EvidenceContext) -> Option<String> {
        match self {
            RedFlagRule::MissingReadme => {
                let missing = ctx.missing_readme();
                (!missing.is_empty()).then(|| {
                    format!(
                        "{} repo(s) missing README files: {}.",
                        missing.len(),
                        join_names(&missing)
                    )
                })
            }
            RedFlagRule::MissingDescription => {
                let missing = ctx.missing_description();
                (!missing.is_empty()).then(|| {
                    format!(
                        "{} repo(s) missing descriptions: {}.",
                        missing.len(),
                        join_names(&missing)
                    )
                })
            }
            RedFlagRule::LowActivity => (ctx.active_days() < 5).then(|| {
                "Low commit activity in the last 30 days — recruiters look for consistency."
                    .to_string()
            }),
            RedFlagRule::MissingGitignore => {
                let missing = ctx.missing_gitignore();
                (!missing.is_empty())
                    .then(|| format!("{} repo(s) missing .gitignore files.", missing.len()))
            }
            RedFlagRule::NarrowLanguages => (ctx.bundle.language_count() < 2).then(|| {
                "Limited language diversity — consider exploring new technologies.".to_string()
            }),
        }
    }
}

pub fn generate_red_flags(ctx: &EvidenceContext) -> Vec<String> {
    RedFlagRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(ctx))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationRule {
    AddReadme,
    CommitMoreOften,
    AddDescription,
    AddGitignore,
    PinTopProjects,
}

impl RecommendationRule {
    pub const ALL: [RecommendationRule; 5] = [
        RecommendationRule::AddReadme,
        RecommendationRule::CommitMoreOften,
        RecommendationRule::AddDescription,
        RecommendationRule::AddGitignore,
        RecommendationRule::PinTopProjects,
    ];

    pub fn impact(&self) -> Impact {
        match self {
            RecommendationRule::AddReadme | RecommendationRule::CommitMoreOften => Impact::High,
            RecommendationRule::AddDescription
            | RecommendationRule::AddGitignore
            | RecommendationRule::PinTopProjects => Impact::Medium,
        }
    }

    pub fn evaluate(&self, ctx: &EvidenceContext) -> Option<Recommendation> {
        let (title, description) = match self {
            RecommendationRule::AddReadme => {
                let first = ctx.missing_readme().into_iter().next()?;
                (
                    "Add README documentation",
                    format!(
                        "Add a detailed README to \"{}\" to boost your documentation score. \
                         Include project purpose, setup instructions, and screenshots.",
                        first.name
                    ),
                )
            }
            RecommendationRule::CommitMoreOften => {
                if ctx.active_days() >= 10 {
                    return None;
                }
                (
                    "Increase commit frequency",
                    "Try to commit code at least 3-4 days per week. Even small updates \
                     signal active development to recruiters."
                        .to_string(),
                )
            }
            RecommendationRule::AddDescription => {
                let first = ctx.missing_description().into_iter().next()?;
                (
                    "Add repository descriptions",
                    format!(
                        "Add a clear, concise description to \"{}\" — recruiters scan \
                         descriptions to quickly understand your work.",
                        first.name
                    ),
                )
            }
            RecommendationRule::AddGitignore => {
                let first = ctx.missing_gitignore().into_iter().next()?;
                (
                    "Add .gitignore files",
                    format!(
                        "Add a .gitignore to \"{}\" to show you follow professional \
                         development practices.",
                        first.name
                    ),
                )
            }
            RecommendationRule::PinTopProjects => {
                if ctx.total_stars() == 0 {
                    return None;
                }
                (
                    "Pin your top projects",
                    "Pin your 2-3 best repositories to your GitHub profile so recruiters \
                     see your strongest work first."
                        .to_string(),
                )
            }
        };

        Some(Recommendation {
            title: title.to_string(),
            description,
            impact: self.impact(),
        })
    }
}

pub fn diversify_recommendation() -> Recommendation {
    Recommendation {
        title: "Diversify your tech stack".to_string(),
        description: "Start a small project in a new language or framework to signal \
                      adaptability and curiosity to employers."
            .to_string(),
        impact: Impact::Low,
    }
}

pub fn generate_recommendations(ctx: &EvidenceContext) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RecommendationRule::ALL
        .iter()
        .filter_map(|rule| rule.evaluate(ctx))
        .collect();

    if recommendations.len() < MAX_RECOMMENDATIONS {
        recommendations.push(diversify_recommendation());
    }

    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
