pub mod client;
pub mod rate_limiter;
pub mod paginator;
pub mod source;
pub mod username;

pub use client::GitHubClient;
pub use source::ProfileSource;
pub use username::parse_username;
