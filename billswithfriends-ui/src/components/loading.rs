//! Loading spinners and skeletons

use leptos::*;

/// Block-level spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-8">
            <div class="loading-spinner w-8 h-8" />
        </div>
    }
}

#[component]
pub fn InlineLoading() -> impl IntoView {
    view! { <span class="inline-block loading-spinner w-4 h-4" /> }
}

/// Placeholder rows while a list loads
#[component]
pub fn ListSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|_| view! { <div class="bg-gray-700 rounded h-10" /> }).collect_view()}
        </div>
    }
}
