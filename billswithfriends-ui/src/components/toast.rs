//! Toast Notification Component

use leptos::*;

use crate::state::use_global_state;

/// Success and error toasts from the global state
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50 space-y-2">
            {move || {
                state.success.get().map(|msg| view! {
                    <ToastMessage message=msg error=false />
                })
            }}

            {move || {
                state.error.get().map(|msg| view! {
                    <div on:click=move |_| state.clear_error() class="cursor-pointer">
                        <ToastMessage message=msg error=true />
                    </div>
                })
            }}
        </div>
    }
}

#[component]
fn ToastMessage(#[prop(into)] message: String, error: bool) -> impl IntoView {
    let (icon, bg_class) = if error {
        ("✕", "bg-red-600")
    } else {
        ("✓", "bg-green-600")
    };

    view! {
        <div class=format!(
            "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg",
            bg_class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{message}</span>
        </div>
    }
}
