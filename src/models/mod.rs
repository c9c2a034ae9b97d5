pub mod user;
pub mod bundle;
pub mod analysis;

pub use user::*;
pub use bundle::*;
pub use analysis::*;
