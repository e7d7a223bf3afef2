//! BillsWithFriends
//!
//! Client shell for splitting bills, planning expenses and keeping friends
//! accountable, built with Leptos (WASM).
//!
//! # Architecture
//!
//! Client-side rendered Leptos application. The shell routes between three
//! pages from a single route table; the pages talk to the backend through
//! relative URLs that the dev server proxies.
//!
//! - `routes`: the route table, `dispatch` and the nav items
//! - `router`: `Navigator`, owner of the current path
//! - `shell`: DOM-free render description of the shell
//! - `app` / `components`: the live Leptos tree

use leptos::*;
use wasm_bindgen::JsCast;

mod api;
mod app;
mod components;
mod pages;
mod router;
mod routes;
mod shell;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // The page must provide the anchor; without it there is nothing to mount into
    let root = document()
        .get_element_by_id("root")
        .expect("index.html must contain an element with id=\"root\"")
        .unchecked_into::<web_sys::HtmlElement>();

    mount_to(root, || view! { <app::App /> });
}
