pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;

pub use config::{Config, PipelineConfig};
pub use error::{Error, ErrorKind, Result};
pub use github::{parse_username, GitHubClient, ProfileSource};
pub use analysis::{AnalysisPipeline, ScoringEngine};
