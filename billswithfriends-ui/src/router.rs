//! Navigator
//!
//! Owns the current path. It starts from the browser location and changes
//! only through [`Navigator::navigate`]; the active page is derived from it
//! on demand and never stored.

use crate::routes::{dispatch, Outlet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigator {
    current: String,
}

impl Navigator {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            current: initial_path.into(),
        }
    }

    /// Set the current path. Returns whether it changed.
    pub fn navigate(&mut self, path: &str) -> bool {
        if self.current == path {
            return false;
        }
        self.current = path.to_string();
        true
    }

    pub fn current_path(&self) -> &str {
        &self.current
    }

    pub fn active_page(&self) -> Outlet {
        dispatch(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{nav_items, Page};

    #[test]
    fn test_activating_each_control_sets_its_target() {
        let mut nav = Navigator::new("/");
        for item in nav_items() {
            nav.navigate(item.target);
            assert_eq!(nav.current_path(), item.target);
            assert!(nav.active_page().page().is_some());
        }
    }

    #[test]
    fn test_navigate_reports_change() {
        let mut nav = Navigator::new("/billsplitter");
        assert!(!nav.navigate("/billsplitter"));
        assert!(nav.navigate("/expenseplanner"));
        assert_eq!(nav.active_page(), Outlet::Page(Page::ExpensePlanner));
    }

    #[test]
    fn test_round_trip_equals_direct() {
        let mut via_b = Navigator::new("/");
        via_b.navigate("/billsplitter");
        via_b.navigate("/socialaccountability");
        via_b.navigate("/billsplitter");

        let direct = Navigator::new("/billsplitter");
        assert_eq!(via_b, direct);
        assert_eq!(via_b.active_page(), direct.active_page());
    }

    #[test]
    fn test_unknown_path_is_a_valid_state() {
        let mut nav = Navigator::new("/billsplitter");
        nav.navigate("/unknown");
        assert_eq!(nav.current_path(), "/unknown");
        assert_eq!(nav.active_page(), Outlet::NotFound);
    }
}
