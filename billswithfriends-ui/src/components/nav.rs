//! Navigation Component
//!
//! One link per route table entry. Clicking a link changes the router
//! location; the shell's `Navigator` follows it.

use leptos::*;
use leptos_router::*;

use crate::shell::NavControl;

/// Navigation bar
#[component]
pub fn Nav(#[prop(into)] controls: Signal<Vec<NavControl>>) -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center space-x-1 h-14">
                    {move || {
                        controls
                            .get()
                            .into_iter()
                            .map(|control| view! { <NavLink control=control /> })
                            .collect_view()
                    }}
                </div>
            </div>
        </nav>
    }
}

#[component]
fn NavLink(control: NavControl) -> impl IntoView {
    let class = if control.active {
        "px-4 py-2 rounded-lg bg-gray-700 text-white"
    } else {
        "px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
    };

    view! {
        <A href=control.target class=class>
            {control.label}
        </A>
    }
}
