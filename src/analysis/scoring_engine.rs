use chrono::{DateTime, Utc};

use crate::analysis::activity::{longest_streak, top_languages, TOP_LANGUAGE_LIMIT};
use crate::analysis::dimensions::{
    clamp_score, score_best_practices, score_consistency, score_documentation, score_impact,
};
use crate::analysis::evidence::{
    generate_recommendations, generate_red_flags, generate_strengths, EvidenceContext,
};
use crate::error::Result;
use crate::models::analysis::{AnalysisReport, AnalysisResult, Dimensions};
use crate::models::ProfileBundle;

pub struct ScoringEngine {
    weights: DimensionWeights,
}

#[derive(Debug, Clone)]
pub struct DimensionWeights {
    pub documentation: f64,
    pub consistency: f64,
    pub impact: f64,
    pub best_practices: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            documentation: 0.30,
            consistency: 0.25,
            impact: 0.25,
            best_practices: 0.20,
        }
    }
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self {
            weights: DimensionWeights::default(),
        }
    }

    /// Score a bundle as of `now`.
    ///
    /// Never fails: sparse bundles just score low. `now` anchors the 30-day
    /// activity window, so the same bundle and instant always give the same
    /// result.
    pub fn calculate_score(&self, bundle: &ProfileBundle, now: DateTime<Utc>) -> AnalysisResult {
        let dimensions = self.score_dimensions(bundle, now);
        let total_score = self.total_score(&dimensions);

        let ctx = EvidenceContext::new(&dimensions, bundle);
        let strengths = generate_strengths(&ctx);
        let red_flags = generate_red_flags(&ctx);
        let recommendations = generate_recommendations(&ctx);

        AnalysisResult {
            total_score,
            top_languages: top_languages(&bundle.languages, TOP_LANGUAGE_LIMIT),
            longest_streak: longest_streak(&bundle.events),
            total_repos: bundle.total_repos(),
            strengths,
            red_flags,
            recommendations,
            dimensions,
        }
    }

    /// Validate and score an already assembled bundle.
    pub fn analyze_bundle(&self, bundle: ProfileBundle, now: DateTime<Utc>) -> Result<AnalysisReport> {
        bundle.validate()?;

        let analysis = self.calculate_score(&bundle, now);
        tracing::info!(
            "Scored {}: {}/100 ({})",
            bundle.profile.login,
            analysis.total_score,
            analysis.tier()
        );

        Ok(AnalysisReport {
            user: bundle.profile,
            analysis,
        })
    }

    pub fn score_dimensions(&self, bundle: &ProfileBundle, now: DateTime<Utc>) -> Dimensions {
        Dimensions {
            documentation: score_documentation(&bundle.repo_details),
            consistency: score_consistency(&bundle.events, now),
            impact: score_impact(&bundle.repos),
            best_practices: score_best_practices(&bundle.repo_details),
        }
    }

    pub fn total_score(&self, dimensions: &Dimensions) -> u8 {
        let w = &self.weights;
        clamp_score(
            dimensions.documentation.score as f64 * w.documentation
                + dimensions.consistency.score as f64 * w.consistency
                + dimensions.impact.score as f64 * w.impact
                + dimensions.best_practices.score as f64 * w.best_practices,
        )
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
