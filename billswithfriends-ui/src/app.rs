//! App Root Component
//!
//! Establishes the routing context once and lays out the shell: title,
//! navigation bar and the page region, as siblings.

use leptos::*;
use leptos_router::*;

use crate::components::{Dispatcher, Nav, Toast};
use crate::router::Navigator;
use crate::shell::{ShellView, TITLE};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <Shell />
        </Router>
    }
}

/// Shell inside the routing context
#[component]
fn Shell() -> impl IntoView {
    let location = use_location();

    // The navigator starts from the initial browser location and follows
    // every router transition (link clicks, back/forward).
    let navigator = create_rw_signal(Navigator::new(location.pathname.get_untracked()));
    create_effect(move |_| {
        let path = location.pathname.get();
        if navigator.with_untracked(|nav| nav.current_path() != path) {
            navigator.update(|nav| {
                nav.navigate(&path);
            });
        }
        if navigator.with_untracked(|nav| nav.active_page().page().is_none()) {
            web_sys::console::log_1(&format!("No page for path {:?}", path).into());
        }
    });

    let shell = create_memo(move |_| navigator.with(|nav| ShellView::render(nav.current_path())));
    let controls = Signal::derive(move || shell.with(|view| view.nav.clone()));
    let outlet = Signal::derive(move || shell.with(|view| view.outlet));

    view! {
        <div class="min-h-screen bg-gray-900 text-white flex flex-col">
            <header class="container mx-auto px-4 pt-6 pb-2">
                <h1 class="text-3xl font-bold">{TITLE}</h1>
            </header>

            <Nav controls=controls />

            <main class="flex-1 container mx-auto px-4 py-8">
                <Dispatcher outlet=outlet />
            </main>

            <Toast />
        </div>
    }
}
