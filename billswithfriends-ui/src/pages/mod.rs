//! Pages
//!
//! Feature pages mounted by the dispatcher. Each takes no props.

pub mod bill_splitter;
pub mod expense_planner;
pub mod social_accountability;

pub use bill_splitter::BillSplitter;
pub use expense_planner::ExpensePlanner;
pub use social_accountability::SocialAccountability;
