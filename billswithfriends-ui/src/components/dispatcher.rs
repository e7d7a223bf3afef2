//! Route Dispatcher
//!
//! Mounts exactly one page for the current outlet. The outlet is memoised,
//! so a page subtree is rebuilt only when the outlet actually changes and
//! the previous page is unmounted in the same step.

use leptos::*;
use leptos_router::*;

use crate::pages::{BillSplitter, ExpensePlanner, SocialAccountability};
use crate::routes::{nav_items, Outlet, Page};

#[component]
pub fn Dispatcher(#[prop(into)] outlet: Signal<Outlet>) -> impl IntoView {
    let outlet = create_memo(move |_| outlet.get());

    view! {
        <div class="page-region">
            {move || match outlet.get() {
                Outlet::Page(Page::BillSplitter) => view! { <BillSplitter /> }.into_view(),
                Outlet::Page(Page::ExpensePlanner) => view! { <ExpensePlanner /> }.into_view(),
                Outlet::Page(Page::SocialAccountability) => {
                    view! { <SocialAccountability /> }.into_view()
                }
                Outlet::NotFound => view! { <NotFound /> }.into_view(),
            }}
        </div>
    }
}

/// Shown when no route matches; mounts none of the feature pages
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[40vh] text-center">
            <h2 class="text-2xl font-bold mb-2">"Page not found"</h2>
            <p class="text-gray-400 mb-6">"Pick one of the pages below."</p>
            <div class="flex space-x-3">
                {nav_items()
                    .into_iter()
                    .map(|item| view! {
                        <A
                            href=item.target
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                        >
                            {item.label}
                        </A>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
