//! Leagues Page
//!
//! Browse existing leagues, create new ones, and join as the
//! local profile's display name.

use leptos::*;

use crate::api;
use crate::components::ListSkeleton;
use crate::state::global::{GlobalState, League};

/// Leagues page component
#[component]
pub fn Leagues() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch leagues and profile on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            state.loading.set(true);

            match api::fetch_leagues().await {
                Ok(leagues) => state.leagues.set(leagues),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch leagues: {}", e).into());
                }
            }

            if let Ok(profile) = api::fetch_profile().await {
                state.profile.set(profile);
            }

            state.loading.set(false);
        });
    });

    let state_for_mine = state.clone();
    let state_for_all = state.clone();

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Leagues"</h1>
                <p class="text-gray-400 mt-1">"Grind together, compete together"</p>
            </div>

            <CreateLeagueForm />

            // My leagues
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-lg font-semibold mb-4">"My Leagues"</h2>
                {move || {
                    let mine = state_for_mine.my_leagues();
                    if mine.is_empty() {
                        view! {
                            <p class="text-gray-400">"You haven't joined any leagues yet."</p>
                        }.into_view()
                    } else {
                        view! {
                            <div class="space-y-3">
                                {mine.into_iter().map(|league| view! {
                                    <LeagueCard league=league joined=true />
                                }).collect_view()}
                            </div>
                        }.into_view()
                    }
                }}
            </section>

            // All leagues
            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-lg font-semibold mb-4">"All Leagues"</h2>
                {
                    let state = state_for_all.clone();
                    move || {
                        if state.loading.get() {
                            view! { <ListSkeleton count=3 /> }.into_view()
                        } else {
                            let leagues = state.leagues.get();
                            if leagues.is_empty() {
                                view! {
                                    <p class="text-gray-400 text-center py-8">
                                        "No leagues yet. Create the first one above."
                                    </p>
                                }.into_view()
                            } else {
                                let me = state.profile.get().name;
                                view! {
                                    <div class="space-y-3">
                                        {leagues.into_iter().map(|league| {
                                            let joined = league.has_member(&me);
                                            view! { <LeagueCard league=league joined=joined /> }
                                        }).collect_view()}
                                    </div>
                                }.into_view()
                            }
                        }
                    }
                }
            </section>
        </div>
    }
}

/// Form for creating a new league
#[component]
fn CreateLeagueForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);

    let state_for_submit = state.clone();
    let submit = move |_| {
        let league_name = name.get();
        if league_name.trim().is_empty() {
            return;
        }

        set_submitting.set(true);
        let state = state_for_submit.clone();
        spawn_local(async move {
            let creator = state.profile.get_untracked().name;
            match api::create_league(league_name.trim(), &creator).await {
                Ok(league) => {
                    state.show_success(&format!("League \"{}\" created", league.name));
                    set_name.set(String::new());

                    if let Ok(leagues) = api::fetch_leagues().await {
                        state.leagues.set(leagues);
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
            <h2 class="text-lg font-semibold mb-4">"Create a League"</h2>
            <div class="flex space-x-2">
                <input
                    type="text"
                    placeholder="League name"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
                <button
                    on:click=submit
                    disabled=move || submitting.get()
                    class="px-6 py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if submitting.get() { "Creating..." } else { "Create" }}
                </button>
            </div>
        </section>
    }
}

/// A single league row with membership info and a join button
#[component]
fn LeagueCard(league: League, joined: bool) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (joining, set_joining) = create_signal(false);

    let league_name = league.name.clone();
    let state_for_join = state.clone();
    let join = move |_| {
        set_joining.set(true);
        let name = league_name.clone();
        let state = state_for_join.clone();
        spawn_local(async move {
            let user = state.profile.get_untracked().name;
            match api::join_league(&name, &user).await {
                Ok(_) => {
                    state.show_success(&format!("Joined \"{}\"", name));
                    if let Ok(leagues) = api::fetch_leagues().await {
                        state.leagues.set(leagues);
                    }
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_joining.set(false);
        });
    };

    let member_count = league.members.len();
    let member_list = league.members.join(", ");

    view! {
        <div class="flex items-center justify-between bg-gray-700/50 rounded-lg px-4 py-3">
            <div>
                <div class="font-medium">{league.name.clone()}</div>
                <div class="text-sm text-gray-400">
                    {format!("{} member{}", member_count, if member_count == 1 { "" } else { "s" })}
                    " · created by "
                    {league.creator.clone()}
                </div>
                <div class="text-xs text-gray-500 mt-1">{member_list}</div>
            </div>

            {if joined {
                view! {
                    <span class="px-3 py-1 text-sm bg-green-900/50 text-green-400 rounded-full">
                        "Joined"
                    </span>
                }.into_view()
            } else {
                view! {
                    <button
                        on:click=join
                        disabled=move || joining.get()
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                               rounded-lg text-sm font-medium transition-colors"
                    >
                        {move || if joining.get() { "Joining..." } else { "Join" }}
                    </button>
                }.into_view()
            }}
        </div>
    }
}
