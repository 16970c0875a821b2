//! Dashboard Page
//!
//! Leaderboard view with tracked members ranked by weighted points,
//! plus controls to add usernames and refresh stats.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch initial data on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_members().await {
                Ok(members) => {
                    state.members.set(members);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch members: {}", e).into());
                }
            }

            state.loading.set(false);
        });
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Leaderboard"</h1>
                    <p class="text-gray-400 mt-1">"Who's grinding the hardest?"</p>
                </div>

                <SyncButton />
            </div>

            // Add member form
            <AddMemberForm />

            // Leaderboard table
            <section class="bg-gray-800 rounded-xl p-6">
                {
                    let state = state.clone();
                    move || {
                        if state.loading.get() {
                            view! { <ListSkeleton count=5 /> }.into_view()
                        } else {
                            let members = state.members.get();
                            if members.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-center py-8">
                                        "No bros tracked yet. Add a LeetCode username above to get started."
                                    </p>
                                }.into_view()
                            } else {
                                view! { <LeaderboardTable /> }.into_view()
                            }
                        }
                    }
                }
            </section>

            // Scoring explanation
            <p class="text-sm text-gray-500 text-center">
                "Points: Easy = 1, Medium = 2, Hard = 5"
            </p>
        </div>
    }
}

/// Form for tracking a new LeetCode username
#[component]
fn AddMemberForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (username, set_username) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let state_for_submit = state.clone();
    let submit = move |_| {
        let name = username.get();
        if name.trim().is_empty() {
            return;
        }

        set_submitting.set(true);
        let state = state_for_submit.clone();
        spawn_local(async move {
            match api::add_member(name.trim()).await {
                Ok(member) => {
                    state.show_success(&format!(
                        "{} added with {} points",
                        member.username, member.total_points
                    ));
                    set_username.set(String::new());

                    // The WebSocket snapshot also arrives, but refresh
                    // directly so the table updates without a connection.
                    if let Ok(members) = api::fetch_members().await {
                        state.members.set(members);
                    }
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-lg font-semibold mb-4">"Track a Bro"</h2>
            <div class="flex space-x-2">
                <input
                    type="text"
                    placeholder="LeetCode username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=submit
                    disabled=move || submitting.get()
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Adding..." } else { "Add" }}
                </button>
            </div>
        </section>
    }
}

/// Button that triggers a full leaderboard refresh
#[component]
fn SyncButton() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (syncing, set_syncing) = create_signal(false);

    let state_for_sync = state.clone();
    let sync = move |_| {
        set_syncing.set(true);
        let state = state_for_sync.clone();
        spawn_local(async move {
            match api::trigger_sync().await {
                Ok(report) => {
                    if report.failed > 0 {
                        state.show_error(&format!(
                            "Refreshed {} bros, {} failed",
                            report.synced, report.failed
                        ));
                    } else {
                        state.show_success(&format!("Refreshed {} bros", report.synced));
                    }

                    if let Ok(members) = api::fetch_members().await {
                        state.members.set(members);
                    }
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_syncing.set(false);
        });
    };

    view! {
        <button
            on:click=sync
            disabled=move || syncing.get()
            class="px-4 py-2 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800
                   rounded-lg text-sm font-medium transition-colors"
        >
            {move || if syncing.get() { "Refreshing..." } else { "↻ Refresh Stats" }}
        </button>
    }
}

/// The ranked leaderboard table
#[component]
fn LeaderboardTable() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <table class="w-full text-left">
            <thead>
                <tr class="text-gray-400 text-sm border-b border-gray-700">
                    <th class="py-3 pr-4">"#"</th>
                    <th class="py-3 pr-4">"Username"</th>
                    <th class="py-3 pr-4 text-right">"Easy"</th>
                    <th class="py-3 pr-4 text-right">"Medium"</th>
                    <th class="py-3 pr-4 text-right">"Hard"</th>
                    <th class="py-3 text-right">"Points"</th>
                </tr>
            </thead>
            <tbody>
                {move || {
                    state.members.get().into_iter().enumerate().map(|(i, member)| {
                        let rank = i + 1;
                        view! {
                            <tr class="border-b border-gray-700 last:border-0 hover:bg-gray-700/50">
                                <td class="py-3 pr-4 text-lg">{rank_badge(rank)}</td>
                                <td class="py-3 pr-4 font-medium">{member.username}</td>
                                <td class="py-3 pr-4 text-right text-green-400">{member.easy_solved}</td>
                                <td class="py-3 pr-4 text-right text-yellow-400">{member.medium_solved}</td>
                                <td class="py-3 pr-4 text-right text-red-400">{member.hard_solved}</td>
                                <td class="py-3 text-right font-bold">{member.total_points}</td>
                            </tr>
                        }
                    }).collect_view()
                }}
            </tbody>
        </table>
    }
}

/// Medal for the podium, plain rank below it
fn rank_badge(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        n => n.to_string(),
    }
}
