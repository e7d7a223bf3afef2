//! UI Components
//!
//! Shell-level Leptos components.

pub mod dispatcher;
pub mod loading;
pub mod nav;
pub mod toast;

pub use dispatcher::Dispatcher;
pub use loading::{InlineLoading, ListSkeleton, Loading};
pub use nav::Nav;
pub use toast::Toast;
