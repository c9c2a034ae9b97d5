pub mod pipeline;
pub mod dimensions;
pub mod activity;
pub mod evidence;
pub mod scoring_engine;

pub use pipeline::AnalysisPipeline;
pub use scoring_engine::ScoringEngine;
