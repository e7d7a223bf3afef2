//! API Routes
//!
//! Route handlers organized by functionality.

pub mod bills;
pub mod health;
pub mod receipt;
pub mod social;
