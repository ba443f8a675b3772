use serde::{Deserialize, Serialize};

use super::events::UserIntent;

/// The committed screen selector
///
/// # Transitions
/// ```text
/// Landing <-> AuthPrompt
/// Landing --(session)--> Onboarding | Dashboard
/// Onboarding --(complete + refetch)--> Dashboard | Onboarding
/// Dashboard <-> Profile
/// any --(session lost)--> Landing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Landing,
    #[serde(rename = "auth")]
    AuthPrompt,
    Onboarding,
    Dashboard,
    Profile,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewState::Landing => write!(f, "landing"),
            ViewState::AuthPrompt => write!(f, "auth"),
            ViewState::Onboarding => write!(f, "onboarding"),
            ViewState::Dashboard => write!(f, "dashboard"),
            ViewState::Profile => write!(f, "profile"),
        }
    }
}

/// What the UI should draw right now
///
/// `Loading` overlays whatever view is pending while the auth check or a
/// profile fetch is outstanding. The auth prompt is drawn as a modal on top
/// of the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderedView {
    Loading,
    Landing,
    LandingWithAuthModal,
    Onboarding,
    Dashboard,
    Profile,
}

impl RenderedView {
    /// Callbacks handed to the view; nothing else is pushed down
    pub fn intents(&self) -> &'static [UserIntent] {
        match self {
            RenderedView::Loading => &[],
            RenderedView::Landing => &[UserIntent::GetStarted],
            RenderedView::LandingWithAuthModal => &[UserIntent::GetStarted, UserIntent::CloseAuth],
            RenderedView::Onboarding => &[UserIntent::OnboardingComplete],
            RenderedView::Dashboard => &[UserIntent::ShowProfile],
            RenderedView::Profile => &[UserIntent::Back],
        }
    }

    pub fn accepts(&self, intent: UserIntent) -> bool {
        self.intents().contains(&intent)
    }
}

impl From<ViewState> for RenderedView {
    fn from(state: ViewState) -> Self {
        match state {
            ViewState::Landing => RenderedView::Landing,
            ViewState::AuthPrompt => RenderedView::LandingWithAuthModal,
            ViewState::Onboarding => RenderedView::Onboarding,
            ViewState::Dashboard => RenderedView::Dashboard,
            ViewState::Profile => RenderedView::Profile,
        }
    }
}

impl std::fmt::Display for RenderedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderedView::Loading => write!(f, "loading"),
            RenderedView::Landing => write!(f, "landing"),
            RenderedView::LandingWithAuthModal => write!(f, "landing+auth"),
            RenderedView::Onboarding => write!(f, "onboarding"),
            RenderedView::Dashboard => write!(f, "dashboard"),
            RenderedView::Profile => write!(f, "profile"),
        }
    }
}
