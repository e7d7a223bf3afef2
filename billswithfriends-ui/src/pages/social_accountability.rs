//! Social Accountability Page
//!
//! Friends list and a leaderboard of who settles up on time.

use leptos::*;

use crate::api::{self, Friend, LeaderboardEntry, Metrics};
use crate::components::{ListSkeleton, Loading};
use crate::state::use_global_state;

#[component]
pub fn SocialAccountability() -> impl IntoView {
    let (version, set_version) = create_signal(0u32);
    let refresh = move || set_version.update(|v| *v += 1);

    let friends = create_local_resource(move || version.get(), |_| api::fetch_friends());
    let leaderboard = create_local_resource(move || version.get(), |_| api::fetch_leaderboard());

    view! {
        <div class="space-y-8">
            <div>
                <h2 class="text-2xl font-bold">"Social Accountability"</h2>
                <p class="text-gray-400 mt-1">"Keep each other honest about paying up"</p>
            </div>

            <div class="grid grid-cols-2 gap-6">
                <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <h3 class="text-lg font-semibold">"Friends"</h3>
                    <AddFriendForm on_added=refresh />
                    <Suspense fallback=|| view! { <ListSkeleton /> }>
                        {move || friends.get().map(|result| match result {
                            Ok(friends) => view! { <FriendList friends=friends on_removed=refresh /> }.into_view(),
                            Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                        })}
                    </Suspense>
                </section>

                <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                    <h3 class="text-lg font-semibold">"Leaderboard"</h3>
                    <Suspense fallback=|| view! { <Loading /> }>
                        {move || leaderboard.get().map(|result| match result {
                            Ok(entries) => view! { <Leaderboard entries=entries /> }.into_view(),
                            Err(e) => view! { <p class="text-red-400">{e}</p> }.into_view(),
                        })}
                    </Suspense>
                    <MetricsForm on_saved=refresh />
                </section>
            </div>
        </div>
    }
}

#[component]
fn AddFriendForm<F>(on_added: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_global_state();
    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (n, e) = (name.get(), email.get());

        spawn_local(async move {
            match api::add_friend(n.trim(), e.trim()).await {
                Ok(message) => {
                    state.show_success(&message);
                    set_name.set(String::new());
                    set_email.set(String::new());
                    on_added();
                }
                Err(err) => state.show_error(&err),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="flex space-x-2">
            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
                class="flex-1 bg-gray-700 rounded-lg px-3 py-2"
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
                class="flex-1 bg-gray-700 rounded-lg px-3 py-2"
            />
            <button type="submit" class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg">
                "Add"
            </button>
        </form>
    }
}

#[component]
fn FriendList<F>(friends: Vec<Friend>, on_removed: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_global_state();

    if friends.is_empty() {
        return view! { <p class="text-gray-400">"No friends added yet."</p> }.into_view();
    }

    friends
        .into_iter()
        .map(|friend| {
            let email = friend.email.clone();
            let remove = move |_| {
                let email = email.clone();
                spawn_local(async move {
                    match api::remove_friend(&email).await {
                        Ok(message) => {
                            state.show_success(&message);
                            on_removed();
                        }
                        Err(e) => state.show_error(&e),
                    }
                });
            };

            view! {
                <div class="flex justify-between items-center py-2 border-b border-gray-700">
                    <span>{friend.name}</span>
                    <span class="text-gray-400 text-sm">{friend.email}</span>
                    <button on:click=remove class="text-red-400 hover:text-red-300 text-sm">
                        "Remove"
                    </button>
                </div>
            }
        })
        .collect_view()
}

#[component]
fn Leaderboard(entries: Vec<LeaderboardEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="text-gray-400">"Nobody on the board yet."</p> }.into_view();
    }

    view! {
        <table class="w-full text-sm">
            <thead>
                <tr class="text-gray-400 text-left">
                    <th>"#"</th>
                    <th>"User"</th>
                    <th class="text-right">"Points"</th>
                    <th class="text-right">"Days late"</th>
                    <th class="text-right">"Total"</th>
                </tr>
            </thead>
            <tbody>
                {entries
                    .into_iter()
                    .enumerate()
                    .map(|(rank, entry)| view! {
                        <tr class="border-b border-gray-700">
                            <td>{rank + 1}</td>
                            <td>{entry.user}</td>
                            <td class="text-right">{entry.metrics.points}</td>
                            <td class="text-right">{entry.metrics.days_late}</td>
                            <td class="text-right">{format!("{:.2}", entry.metrics.total_amount)}</td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
    .into_view()
}

#[component]
fn MetricsForm<F>(on_saved: F) -> impl IntoView
where
    F: Fn() + Copy + 'static,
{
    let state = use_global_state();
    let (user, set_user) = create_signal(String::new());
    let (points, set_points) = create_signal(String::new());
    let (days_late, set_days_late) = create_signal(String::new());
    let (total, set_total) = create_signal(String::new());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let parsed = (
            points.get().trim().parse::<i64>(),
            days_late.get().trim().parse::<i64>(),
            total.get().trim().parse::<f64>(),
        );
        let (Ok(pts), Ok(late), Ok(total_amount)) = parsed else {
            state.show_error("Points, days late and total must be numbers");
            return;
        };

        let entry = LeaderboardEntry {
            user: user.get().trim().to_string(),
            metrics: Metrics {
                points: pts,
                days_late: late,
                total_amount,
            },
        };

        spawn_local(async move {
            match api::update_metrics(&entry).await {
                Ok(message) => {
                    state.show_success(&message);
                    on_saved();
                }
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <form on:submit=on_submit class="grid grid-cols-5 gap-2 pt-4">
            <input
                type="text"
                placeholder="User"
                prop:value=move || user.get()
                on:input=move |ev| set_user.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-2 py-2"
            />
            <input
                type="number"
                placeholder="Points"
                prop:value=move || points.get()
                on:input=move |ev| set_points.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-2 py-2"
            />
            <input
                type="number"
                min="0"
                placeholder="Days late"
                prop:value=move || days_late.get()
                on:input=move |ev| set_days_late.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-2 py-2"
            />
            <input
                type="number"
                step="0.01"
                placeholder="Total"
                prop:value=move || total.get()
                on:input=move |ev| set_total.set(event_target_value(&ev))
                class="bg-gray-700 rounded-lg px-2 py-2"
            />
            <button type="submit" class="bg-gray-600 hover:bg-gray-500 rounded-lg">"Save"</button>
        </form>
    }
}
