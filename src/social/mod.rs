//! Social Accountability
//!
//! Friends and a points leaderboard that tracks who pays on time,
//! persisted in SQLite.

pub mod error;
pub mod store;
pub mod types;

pub use error::{SocialError, SocialResult};
pub use store::SocialStore;
pub use types::{AccountabilityMetrics, Friend, LeaderboardEntry};
