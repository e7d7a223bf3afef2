//! Backend Proxy
//!
//! Forwards API paths (`/bills`, ...) from the dev server to the backend
//! service so the UI can use same-origin relative URLs.
//!
//! - **rule**: prefix rules and the ordered `ProxyTable`
//! - **forward**: the `Forwarder` that replays requests upstream
//! - **error**: Error types

pub mod error;
pub mod forward;
pub mod rule;

pub use error::ProxyError;
pub use forward::Forwarder;
pub use rule::{ProxyRule, ProxyTable};
