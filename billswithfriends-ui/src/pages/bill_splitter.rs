//! Bill Splitter Page
//!
//! Create bills, add items, ask the backend for a total and upload receipt
//! images.

use leptos::*;

use crate::api::{self, Bill, Item, RecordId};
use crate::components::{InlineLoading, ListSkeleton};
use crate::state::use_global_state;

#[component]
pub fn BillSplitter() -> impl IntoView {
    // Bumped after every mutation so the resources refetch
    let (version, set_version) = create_signal(0u32);
    let refresh = move || set_version.update(|v| *v += 1);

    let (owner_filter, set_owner_filter) = create_signal(String::new());
    let selected = create_rw_signal(None::<RecordId>);

    let bills = create_local_resource(
        move || (version.get(), owner_filter.get()),
        |(_, owner)| async move { api::fetch_bills(Some(owner.as_str())).await },
    );

    view! {
        <div class="space-y-8">
            <div>
                <h2 class="text-2xl font-bold">"Bill Splitter"</h2>
                <p class="text-gray-400 mt-1">"Split a bill item by item"</p>
            </div>

            <CreateBillForm on_created=move |id| {
                selected.set(Some(id));
                refresh();
            } />

            <section class="bg-gray-800 rounded-xl p-6">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="text-lg font-semibold">"Bills"</h3>
                    <input
                        type="text"
                        placeholder="Filter by user"
                        prop:value=move || owner_filter.get()
                        on:input=move |ev| set_owner_filter.set(event_target_value(&ev))
                        class="bg-gray-700 rounded-lg px-3 py-1 text-sm"
                    />
                </div>
                <Suspense fallback=|| view! { <ListSkeleton /> }>
                    {move || bills.get().map(|result| match result {
                        Ok(bills) if bills.is_empty() => {
                            view! { <p class="text-gray-400">"No bills yet."</p> }.into_view()
                        }
                        Ok(bills) => bills
                            .into_iter()
                            .map(|(id, bill)| view! { <BillRow id=id bill=bill selected=selected /> })
                            .collect_view(),
                        Err(e) => view! {
                            <p class="text-red-400">{format!("Could not load bills: {}", e)}</p>
                        }
                        .into_view(),
                    })}
                </Suspense>
            </section>

            {move || selected.get().map(|id| view! {
                <BillDetail id=id version=version on_changed=refresh />
            })}
        </div>
    }
}

#[component]
fn BillRow(id: RecordId, bill: Bill, selected: RwSignal<Option<RecordId>>) -> impl IntoView {
    let total = bill
        .total()
        .map(|t| format!("{:.2}", t))
        .unwrap_or_else(|| "-".to_string());

    view! {
        <button
            on:click=move |_| selected.set(Some(id))
            class=move || {
                if selected.get() == Some(id) {
                    "w-full flex justify-between px-3 py-2 rounded-lg bg-gray-700"
                } else {
                    "w-full flex justify-between px-3 py-2 rounded-lg hover:bg-gray-700"
                }
            }
        >
            <span>{format!("#{} {}", id, bill.name())}</span>
            <span class="text-gray-400">{bill.owner()}</span>
            <span>{total}</span>
        </button>
    }
}

#[component]
fn CreateBillForm<F>(on_created: F) -> impl IntoView
where
    F: Fn(RecordId) + Copy + 'static,
{
    let state = use_global_state();
    let (name, set_name) = create_signal(String::new());
    let (user_id, set_user_id) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (n, u) = (name.get(), user_id.get());
        if n.trim().is_empty() || u.trim().is_empty() {
            state.show_error("Bill name and user are required");
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            match api::create_bill(n.trim(), u.trim()).await {
                Ok(id) => {
                    state.show_success("Bill created successfully");
                    set_name.set(String::new());
                    on_created(id);
                }
                Err(e) => state.show_error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="bg-gray-800 rounded-xl p-6 flex space-x-3">
            <input
                type="text"
                placeholder="Bill name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
                class="flex-1 bg-gray-700 rounded-lg px-3 py-2"
            />
            <input
                type="text"
                placeholder="Your user id"
                prop:value=move || user_id.get()
                on:input=move |ev| set_user_id.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-3 py-2"
            />
            <button
                type="submit"
                disabled=move || submitting.get()
                class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg"
            >
                {move || if submitting.get() { "Creating..." } else { "Create bill" }}
            </button>
        </form>
    }
}

#[component]
fn BillDetail<F>(id: RecordId, version: ReadSignal<u32>, on_changed: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_global_state();

    let bill = create_local_resource(
        move || version.get(),
        move |_| async move { api::fetch_bill(id).await },
    );
    let items = create_local_resource(
        move || version.get(),
        move |_| async move { api::fetch_items(id).await },
    );

    let (calculating, set_calculating) = create_signal(false);
    let calculate = move |_| {
        set_calculating.set(true);
        spawn_local(async move {
            match api::calculate_total(id).await {
                Ok(message) => {
                    state.show_success(&message);
                    // The total is written by a background task on the backend
                    gloo_timers::future::TimeoutFuture::new(500).await;
                    on_changed();
                }
                Err(e) => state.show_error(&e),
            }
            set_calculating.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <div class="flex items-center justify-between">
                <h3 class="text-lg font-semibold">
                    {move || {
                        let name = bill
                            .get()
                            .and_then(|b| b.ok())
                            .map(|b| b.name())
                            .unwrap_or_default();
                        format!("Bill #{} {}", id, name)
                    }}
                </h3>
                <span class="text-xl font-bold">
                    {move || {
                        bill.get()
                            .and_then(|b| b.ok())
                            .and_then(|b| b.total())
                            .map(|t| format!("Total {:.2}", t))
                            .unwrap_or_else(|| "Total not calculated".to_string())
                    }}
                </span>
            </div>

            <Suspense fallback=|| view! { <ListSkeleton count=2 /> }>
                {move || items.get().map(|result| match result {
                    Ok(items) => view! { <ItemList items=items /> }.into_view(),
                    Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                })}
            </Suspense>

            <AddItemForm id=id on_added=on_changed />

            <div class="flex items-center space-x-3">
                <button
                    on:click=calculate
                    disabled=move || calculating.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600 rounded-lg"
                >
                    "Calculate total"
                </button>
                {move || calculating.get().then(|| view! { <InlineLoading /> })}
            </div>

            <ReceiptUpload id=id />
        </section>
    }
}

#[component]
fn ItemList(items: Vec<Item>) -> impl IntoView {
    if items.is_empty() {
        return view! { <p class="text-gray-400">"No items on this bill."</p> }.into_view();
    }

    items
        .into_iter()
        .map(|item| view! {
            <div class="flex justify-between py-2 border-b border-gray-700">
                <span>{item.name.unwrap_or_default()}</span>
                <span class="text-gray-400">{format!("x{}", item.quantity.unwrap_or(1))}</span>
                <span>{format!("{:.2}", item.cost)}</span>
            </div>
        })
        .collect_view()
}

#[component]
fn AddItemForm<F>(id: RecordId, on_added: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_global_state();
    let (name, set_name) = create_signal(String::new());
    let (cost, set_cost) = create_signal(String::new());
    let (quantity, set_quantity) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let cost = match cost.get().trim().parse::<f64>() {
            Ok(c) if c.is_finite() && c >= 0.0 => c,
            _ => {
                state.show_error("Cost must be a non-negative number");
                return;
            }
        };
        let quantity = quantity.get().trim().parse::<u32>().ok();
        let name = name.get();

        spawn_local(async move {
            match api::add_item(id, name.trim(), cost, quantity).await {
                Ok(_) => {
                    state.show_success("Item created successfully");
                    set_name.set(String::new());
                    set_cost.set(String::new());
                    set_quantity.set(String::new());
                    on_added();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="grid grid-cols-4 gap-3">
            <input
                type="text"
                placeholder="Item"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-3 py-2"
            />
            <input
                type="number"
                step="0.01"
                placeholder="Cost"
                prop:value=move || cost.get()
                on:input=move |ev| set_cost.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-3 py-2"
            />
            <input
                type="number"
                min="1"
                placeholder="Qty"
                prop:value=move || quantity.get()
                on:input=move |ev| set_quantity.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-3 py-2"
            />
            <button type="submit" class="bg-gray-600 hover:bg-gray-500 rounded-lg">"Add item"</button>
        </form>
    }
}

#[component]
fn ReceiptUpload(id: RecordId) -> impl IntoView {
    let state = use_global_state();
    let (uploading, set_uploading) = create_signal(false);

    let on_change = move |ev: ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        set_uploading.set(true);
        spawn_local(async move {
            match api::upload_receipt(id, file).await {
                Ok(message) => state.show_success(&message),
                Err(e) => state.show_error(&e),
            }
            set_uploading.set(false);
        });
        input.set_value("");
    };

    view! {
        <div class="flex items-center space-x-3">
            <label class="text-sm text-gray-400">"Receipt image (JPG or PNG)"</label>
            <input
                type="file"
                accept=".jpg,.jpeg,.png"
                on:change=on_change
                disabled=move || uploading.get()
                class="text-sm"
            />
            {move || uploading.get().then(|| view! { <InlineLoading /> })}
        </div>
    }
}
