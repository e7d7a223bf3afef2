//! Shell render description
//!
//! [`ShellView::render`] describes what the application shell shows for a
//! path without touching the DOM: the title, the nav bar with its active
//! control, and the page region. The live components render from this
//! value, and the tests inspect it directly.

use std::fmt;

use crate::routes::{dispatch, nav_items, Outlet};

/// Title text shown once at the top of the shell
pub const TITLE: &str = "BillsWithFriends";

/// A nav control as rendered for a given path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavControl {
    pub target: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Top-level regions, in document order
#[derive(Clone, Debug, PartialEq)]
pub enum Region<'a> {
    Title(&'static str),
    NavBar(&'a [NavControl]),
    PageRegion(Outlet),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellView {
    pub title: &'static str,
    pub nav: Vec<NavControl>,
    pub outlet: Outlet,
}

impl ShellView {
    pub fn render(path: &str) -> Self {
        let nav = nav_items()
            .into_iter()
            .map(|item| NavControl {
                target: item.target,
                label: item.label,
                active: item.target == path,
            })
            .collect();

        Self {
            title: TITLE,
            nav,
            outlet: dispatch(path),
        }
    }

    pub fn regions(&self) -> Vec<Region<'_>> {
        vec![
            Region::Title(self.title),
            Region::NavBar(&self.nav),
            Region::PageRegion(self.outlet),
        ]
    }
}

/// Plain-text outline, one region per line
impl fmt::Display for ShellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for region in self.regions() {
            match region {
                Region::Title(title) => writeln!(f, "[title] {}", title)?,
                Region::NavBar(controls) => {
                    write!(f, "[nav]")?;
                    for control in controls {
                        let marker = if control.active { "*" } else { "" };
                        write!(f, " {}{}({})", marker, control.label, control.target)?;
                    }
                    writeln!(f)?;
                }
                Region::PageRegion(Outlet::Page(page)) => writeln!(f, "[page] {}", page.label())?,
                Region::PageRegion(Outlet::NotFound) => writeln!(f, "[page] not found")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Navigator;
    use crate::routes::{Page, ROUTES};

    fn count<F: Fn(&Region) -> bool>(view: &ShellView, pred: F) -> usize {
        view.regions().iter().filter(|r| pred(r)).count()
    }

    #[test]
    fn test_single_render_has_one_of_each_region() {
        for path in ["/billsplitter", "/expenseplanner", "/socialaccountability", "/unknown"] {
            let view = ShellView::render(path);

            assert_eq!(count(&view, |r| matches!(r, Region::Title(_))), 1);
            assert_eq!(count(&view, |r| matches!(r, Region::NavBar(_))), 1);
            assert_eq!(count(&view, |r| matches!(r, Region::PageRegion(_))), 1);
            assert_eq!(view.to_string().matches(TITLE).count(), 1, "{path}");
            assert_eq!(view.nav.len(), ROUTES.len());
        }
    }

    #[test]
    fn test_active_control_follows_path() {
        let view = ShellView::render("/expenseplanner");
        let active: Vec<_> = view.nav.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].target, "/expenseplanner");
        assert_eq!(view.outlet, Outlet::Page(Page::ExpensePlanner));

        let view = ShellView::render("/unknown");
        assert!(view.nav.iter().all(|c| !c.active));
        assert_eq!(view.outlet, Outlet::NotFound);
    }

    #[test]
    fn test_navigating_away_and_back_renders_the_same() {
        for a in ROUTES {
            for b in ROUTES {
                let mut nav = Navigator::new("/");
                nav.navigate(a.path);
                nav.navigate(b.path);
                nav.navigate(a.path);

                let via_b = ShellView::render(nav.current_path());
                let direct = ShellView::render(a.path);
                assert_eq!(via_b, direct);
                assert_eq!(via_b.to_string(), direct.to_string());
            }
        }
    }

    #[test]
    fn test_outline() {
        let text = ShellView::render("/billsplitter").to_string();
        assert_eq!(
            text,
            "[title] BillsWithFriends\n\
             [nav] *Bill Splitter(/billsplitter) Expense Planner(/expenseplanner) \
             Social Accountability(/socialaccountability)\n\
             [page] Bill Splitter\n"
        );
    }
}
