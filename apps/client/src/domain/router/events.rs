use serde::{Deserialize, Serialize};

use crate::domain::profile::UserProfile;
use crate::domain::session::AuthState;
use crate::domain::user::UserId;

/// Requests a view can raise through its callbacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserIntent {
    /// Landing page "get started" button
    GetStarted,
    /// Auth modal closed without signing in
    CloseAuth,
    /// Onboarding form saved
    OnboardingComplete,
    ShowProfile,
    /// Back from the profile page to the dashboard
    Back,
}

impl std::fmt::Display for UserIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserIntent::GetStarted => write!(f, "get_started"),
            UserIntent::CloseAuth => write!(f, "close_auth"),
            UserIntent::OnboardingComplete => write!(f, "onboarding_complete"),
            UserIntent::ShowProfile => write!(f, "show_profile"),
            UserIntent::Back => write!(f, "back"),
        }
    }
}

/// Result of one profile lookup, normalised at the repository boundary
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(UserProfile),
    Missing,
    /// Any error, access denial included; carries the raw message for logs
    Failed(String),
}

/// Inputs to the view router
///
/// Each may arrive independently and in any order.
#[derive(Debug, Clone, PartialEq)]
pub enum RouterEvent {
    AuthChanged(AuthState),
    /// The `tab` navigation parameter changed; any non-empty value asks for
    /// the dashboard
    NavigationChanged { tab: Option<String> },
    ProfileFetched {
        generation: u64,
        outcome: FetchOutcome,
    },
    Intent(UserIntent),
}

/// Side effects the router asks its driver to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterCommand {
    /// Look up the profile and report back with the same generation
    FetchProfile { user_id: UserId, generation: u64 },
}
