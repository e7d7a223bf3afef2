//! Route Table
//!
//! The single source of truth for which path shows which page. Both the
//! dispatcher and the navigation bar read from [`ROUTES`], so the nav
//! targets and the dispatchable paths cannot drift apart.
//!
//! Matching is exact: `/billsplitter/` and `/billsplitter?x=1` as a raw
//! string do not match `/billsplitter`. The router hands us the pathname
//! only, so query strings never reach [`dispatch`].

/// The three feature pages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    BillSplitter,
    ExpensePlanner,
    SocialAccountability,
}

impl Page {
    /// Human-readable name shown on the nav control
    pub const fn label(self) -> &'static str {
        match self {
            Page::BillSplitter => "Bill Splitter",
            Page::ExpensePlanner => "Expense Planner",
            Page::SocialAccountability => "Social Accountability",
        }
    }
}

/// One `(path literal, page)` pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub page: Page,
}

/// Ordered route table. Literals are mutually exclusive.
pub const ROUTES: [Route; 3] = [
    Route {
        path: "/billsplitter",
        page: Page::BillSplitter,
    },
    Route {
        path: "/expenseplanner",
        page: Page::ExpensePlanner,
    },
    Route {
        path: "/socialaccountability",
        page: Page::SocialAccountability,
    },
];

/// What the page region shows for a path
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outlet {
    Page(Page),
    /// No entry matched; no feature page is mounted
    NotFound,
}

impl Outlet {
    pub fn page(self) -> Option<Page> {
        match self {
            Outlet::Page(page) => Some(page),
            Outlet::NotFound => None,
        }
    }
}

/// Select the unique entry whose path equals `path`
pub fn dispatch(path: &str) -> Outlet {
    ROUTES
        .iter()
        .find(|route| route.path == path)
        .map(|route| Outlet::Page(route.page))
        .unwrap_or(Outlet::NotFound)
}

/// A navigation control: where it goes and what it says
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub target: &'static str,
    pub label: &'static str,
}

/// One nav control per route, in table order
pub fn nav_items() -> Vec<NavItem> {
    ROUTES
        .iter()
        .map(|route| NavItem {
            target: route.path,
            label: route.page.label(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_each_path_mounts_its_page() {
        assert_eq!(dispatch("/billsplitter"), Outlet::Page(Page::BillSplitter));
        assert_eq!(dispatch("/expenseplanner"), Outlet::Page(Page::ExpensePlanner));
        assert_eq!(
            dispatch("/socialaccountability"),
            Outlet::Page(Page::SocialAccountability)
        );

        // Exactly one page per path, and it is the mapped one
        for route in ROUTES {
            let mounted: Vec<Page> = [
                Page::BillSplitter,
                Page::ExpensePlanner,
                Page::SocialAccountability,
            ]
            .into_iter()
            .filter(|page| dispatch(route.path).page() == Some(*page))
            .collect();
            assert_eq!(mounted, vec![route.page]);
        }
    }

    #[test]
    fn test_unmatched_paths_mount_nothing() {
        for path in ["/unknown", "/", "", "/billsplitter/", "/BillSplitter", "/bills"] {
            assert_eq!(dispatch(path), Outlet::NotFound, "{path:?}");
            assert_eq!(dispatch(path).page(), None);
        }
    }

    #[test]
    fn test_table_literals_are_exclusive() {
        let paths: HashSet<_> = ROUTES.iter().map(|r| r.path).collect();
        let pages: HashSet<_> = ROUTES.iter().map(|r| r.page).collect();
        assert_eq!(paths.len(), ROUTES.len());
        assert_eq!(pages.len(), ROUTES.len());
    }

    #[test]
    fn test_nav_targets_match_table() {
        let items = nav_items();
        assert_eq!(items.len(), ROUTES.len());

        let targets: HashSet<_> = items.iter().map(|i| i.target).collect();
        let paths: HashSet<_> = ROUTES.iter().map(|r| r.path).collect();
        assert_eq!(targets, paths);

        // Every target dispatches to a page
        for item in &items {
            assert!(dispatch(item.target).page().is_some());
        }
    }
}
