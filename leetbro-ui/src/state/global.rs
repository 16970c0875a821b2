//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// The local user profile
    pub profile: RwSignal<Profile>,
    /// Leaderboard members, already in rank order
    pub members: RwSignal<Vec<Member>>,
    /// All leagues, oldest first
    pub leagues: RwSignal<Vec<League>>,
    /// WebSocket connection status
    pub ws_connected: RwSignal<bool>,
    /// Last time data arrived from the server
    pub last_sync: RwSignal<Option<i64>>,
    /// Global loading state
    pub loading: RwSignal<bool>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// The local user profile
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub linkedin: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "New Bro".to_string(),
            bio: "LeetCode Enthusiast".to_string(),
            avatar_url: "https://api.dicebear.com/7.x/avataaars/svg?seed=LeetBro".to_string(),
            github: String::new(),
            instagram: String::new(),
            linkedin: String::new(),
        }
    }
}

/// A leaderboard member
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Member {
    pub id: i64,
    pub username: String,
    pub easy_solved: u32,
    pub medium_solved: u32,
    pub hard_solved: u32,
    pub total_points: u32,
}

/// A league
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct League {
    pub name: String,
    pub creator: String,
    pub members: Vec<String>,
    pub created_at: String,
}

impl League {
    /// Exact, case-sensitive membership check.
    pub fn has_member(&self, user: &str) -> bool {
        self.members.iter().any(|m| m == user)
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        profile: create_rw_signal(Profile::default()),
        members: create_rw_signal(Vec::new()),
        leagues: create_rw_signal(Vec::new()),
        ws_connected: create_rw_signal(false),
        last_sync: create_rw_signal(None),
        loading: create_rw_signal(false),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

impl GlobalState {
    /// Leagues the current profile belongs to, by display name.
    pub fn my_leagues(&self) -> Vec<League> {
        let name = self.profile.get().name;
        self.leagues
            .get()
            .into_iter()
            .filter(|l| l.has_member(&name))
            .collect()
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let profile = Profile::default();
        assert_eq!(profile.name, "New Bro");
        assert_eq!(profile.bio, "LeetCode Enthusiast");
    }

    #[test]
    fn test_league_membership_is_case_sensitive() {
        let league = League {
            name: "algo-grinders".to_string(),
            creator: "alice".to_string(),
            members: vec!["alice".to_string()],
            created_at: String::new(),
        };
        assert!(league.has_member("alice"));
        assert!(!league.has_member("Alice"));
    }
}
