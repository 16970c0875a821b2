//! Profile Page
//!
//! Edit the local profile: display name, bio, avatar, and socials.
//! The display name is what leagues record as the member identity.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Profile page component
#[component]
pub fn Profile() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (bio, set_bio) = create_signal(String::new());
    let (avatar_url, set_avatar_url) = create_signal(String::new());
    let (github, set_github) = create_signal(String::new());
    let (instagram, set_instagram) = create_signal(String::new());
    let (linkedin, set_linkedin) = create_signal(String::new());
    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (saving, set_saving) = create_signal(false);

    // Load the current profile into the form on mount
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            if let Ok(profile) = api::fetch_profile().await {
                set_name.set(profile.name.clone());
                set_bio.set(profile.bio.clone());
                set_avatar_url.set(profile.avatar_url.clone());
                set_github.set(profile.github.clone());
                set_instagram.set(profile.instagram.clone());
                set_linkedin.set(profile.linkedin.clone());
                state.profile.set(profile);
            }
        });
    });

    let state_for_save = state.clone();
    let save = move |_| {
        if name.get().trim().is_empty() {
            state_for_save.show_error("Display name cannot be empty");
            return;
        }

        set_saving.set(true);
        let state = state_for_save.clone();
        spawn_local(async move {
            let profile = crate::state::global::Profile {
                name: name.get_untracked().trim().to_string(),
                bio: bio.get_untracked(),
                avatar_url: avatar_url.get_untracked(),
                github: github.get_untracked(),
                instagram: instagram.get_untracked(),
                linkedin: linkedin.get_untracked(),
            };

            match api::save_profile(&profile).await {
                Ok(saved) => {
                    state.profile.set(saved);
                    state.show_success("Profile saved");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_saving.set(false);
        });
    };

    let save_api_url = move |_| {
        let url = api_url.get();
        api::set_api_base(url.trim());
    };

    view! {
        <div class="max-w-2xl mx-auto space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Profile"</h1>
                <p class="text-gray-400 mt-1">"This is you"</p>
            </div>

            // Avatar preview
            <div class="flex justify-center">
                <img
                    src=move || avatar_url.get()
                    alt="avatar"
                    class="w-28 h-28 rounded-full border-4 border-primary-600 bg-gray-700 object-cover"
                />
            </div>

            // Profile form
            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <ProfileField
                    label="Display name"
                    placeholder="New Bro"
                    value=name
                    setter=set_name
                />
                <ProfileField
                    label="Bio"
                    placeholder="LeetCode Enthusiast"
                    value=bio
                    setter=set_bio
                />
                <ProfileField
                    label="Avatar URL"
                    placeholder="https://..."
                    value=avatar_url
                    setter=set_avatar_url
                />

                <div class="grid grid-cols-1 sm:grid-cols-3 gap-4">
                    <ProfileField
                        label="GitHub"
                        placeholder="username"
                        value=github
                        setter=set_github
                    />
                    <ProfileField
                        label="Instagram"
                        placeholder="handle"
                        value=instagram
                        setter=set_instagram
                    />
                    <ProfileField
                        label="LinkedIn"
                        placeholder="profile"
                        value=linkedin
                        setter=set_linkedin
                    />
                </div>

                <button
                    on:click=save
                    disabled=move || saving.get()
                    class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                           rounded-lg font-medium transition-colors"
                >
                    {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                </button>
            </section>

            // Server settings
            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <h2 class="text-lg font-semibold">"Server"</h2>
                <p class="text-sm text-gray-400">
                    "Where the LeetBro backend lives. Reload the page after changing."
                </p>
                <div class="flex space-x-2">
                    <input
                        type="text"
                        prop:value=move || api_url.get()
                        on:input=move |ev| set_api_url.set(event_target_value(&ev))
                        class="flex-1 bg-gray-700 rounded-lg px-4 py-2 font-mono text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        on:click=save_api_url
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg
                               text-sm font-medium transition-colors"
                    >
                        "Save"
                    </button>
                </div>
            </section>
        </div>
    }
}

/// A labelled text input bound to a signal pair
#[component]
fn ProfileField(
    label: &'static str,
    placeholder: &'static str,
    value: ReadSignal<String>,
    setter: WriteSignal<String>,
) -> impl IntoView {
    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-1">{label}</label>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| setter.set(event_target_value(&ev))
                class="w-full bg-gray-700 rounded-lg px-4 py-2
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            />
        </div>
    }
}
