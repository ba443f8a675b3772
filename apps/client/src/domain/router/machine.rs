use tracing::{debug, info, warn};

use super::errors::RouterError;
use super::events::{FetchOutcome, RouterCommand, RouterEvent, UserIntent};
use super::view::{RenderedView, ViewState};
use crate::domain::profile::UserProfile;
use crate::domain::session::AuthState;
use crate::domain::user::UserId;

/// Session/profile resolution state machine
///
/// Pure and synchronous: the router only records state and returns the
/// commands its driver must run. Every transition is a single assignment of
/// `view`.
///
/// # Invariants
/// - While the auth check or a profile fetch is outstanding the rendered
///   view is `Loading` and no callbacks are offered
/// - A settled absent session always means `Landing`
/// - One profile fetch per session-presence change, plus one per
///   onboarding-complete intent
/// - A fetch result is applied only if its generation is the latest one
///
/// # Example
/// ```
/// use callsight_client::domain::router::{RenderedView, RouterEvent, ViewRouter};
/// use callsight_client::domain::session::AuthState;
///
/// let mut router = ViewRouter::new();
/// assert_eq!(router.rendered(), RenderedView::Loading);
///
/// router.handle(RouterEvent::AuthChanged(AuthState::signed_out())).unwrap();
/// assert_eq!(router.rendered(), RenderedView::Landing);
/// ```
#[derive(Debug, Clone)]
pub struct ViewRouter {
    view: ViewState,
    auth_loading: bool,
    auth_epoch: u64,
    session: Option<UserId>,
    dashboard_requested: bool,
    profile_loading: bool,
    generation: u64,
    fetched_for: Option<UserId>,
    profile: Option<UserProfile>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    /// A router on `Landing` that waits for the first auth report
    pub fn new() -> Self {
        Self {
            view: ViewState::Landing,
            auth_loading: true,
            auth_epoch: 0,
            session: None,
            dashboard_requested: false,
            profile_loading: false,
            generation: 0,
            fetched_for: None,
            profile: None,
        }
    }

    /// Applies one input and returns the side effects to run
    ///
    /// Only user intents can fail; a rejected intent leaves the router
    /// untouched.
    pub fn handle(&mut self, event: RouterEvent) -> Result<Vec<RouterCommand>, RouterError> {
        match event {
            RouterEvent::AuthChanged(state) => Ok(self.on_auth_changed(state)),
            RouterEvent::NavigationChanged { tab } => {
                self.on_navigation_changed(tab);
                Ok(Vec::new())
            }
            RouterEvent::ProfileFetched {
                generation,
                outcome,
            } => {
                self.on_profile_fetched(generation, outcome);
                Ok(Vec::new())
            }
            RouterEvent::Intent(intent) => self.on_intent(intent),
        }
    }

    fn on_auth_changed(&mut self, state: AuthState) -> Vec<RouterCommand> {
        let user_id = state.user_id();
        let user_changed = user_id != self.session;
        let loading_changed = state.loading != self.auth_loading;
        // Same user, but a sign-out happened in between
        let session_replaced = !user_changed && user_id.is_some() && state.epoch != self.auth_epoch;

        self.auth_loading = state.loading;
        self.session = user_id;
        self.auth_epoch = state.epoch;

        if state.loading || !(user_changed || loading_changed || session_replaced) {
            return Vec::new();
        }

        let Some(user_id) = user_id else {
            self.reset_to_landing();
            return Vec::new();
        };

        if session_replaced {
            debug!(user_id = %user_id, "session replaced for the same user");
            self.reset_to_landing();
        }

        // Runs ahead of profile resolution; the fetch verdict lands later
        if (user_changed || session_replaced) && self.dashboard_requested {
            self.commit(ViewState::Dashboard, "dashboard navigation parameter");
        }

        if self.fetched_for == Some(user_id) {
            return Vec::new();
        }
        vec![self.start_fetch(user_id)]
    }

    fn on_navigation_changed(&mut self, tab: Option<String>) {
        self.dashboard_requested = tab.as_deref().is_some_and(|t| !t.is_empty());
        debug!(tab = ?tab, "navigation parameter changed");

        if self.dashboard_requested && self.session.is_some() && !self.auth_loading {
            self.commit(ViewState::Dashboard, "dashboard navigation parameter");
        }
    }

    fn on_profile_fetched(&mut self, generation: u64, outcome: FetchOutcome) {
        if generation != self.generation || !self.profile_loading {
            debug!(
                generation,
                current = self.generation,
                "discarding superseded profile result"
            );
            return;
        }
        self.profile_loading = false;

        match outcome {
            FetchOutcome::Failed(error) => {
                warn!(error = %error, "profile fetch failed, falling back to onboarding");
                self.commit(ViewState::Onboarding, "profile fetch failed");
            }
            FetchOutcome::Missing => {
                self.profile = None;
                self.commit(ViewState::Onboarding, "no profile");
            }
            FetchOutcome::Found(profile) => {
                let complete = profile.is_complete();
                self.profile = Some(profile);
                if complete {
                    self.commit(ViewState::Dashboard, "profile complete");
                } else {
                    self.commit(ViewState::Onboarding, "profile incomplete");
                }
            }
        }
    }

    fn on_intent(&mut self, intent: UserIntent) -> Result<Vec<RouterCommand>, RouterError> {
        let rendered = self.rendered();
        if !rendered.accepts(intent) {
            return Err(RouterError::InvalidTransition {
                from: rendered,
                intent,
            });
        }

        match intent {
            UserIntent::GetStarted => self.commit(ViewState::AuthPrompt, "get started"),
            UserIntent::CloseAuth => self.commit(ViewState::Landing, "auth modal closed"),
            UserIntent::OnboardingComplete => {
                let user_id = self.session.ok_or(RouterError::NoSession)?;
                return Ok(vec![self.start_fetch(user_id)]);
            }
            UserIntent::ShowProfile => self.commit(ViewState::Profile, "show profile"),
            UserIntent::Back => self.commit(ViewState::Dashboard, "back to dashboard"),
        }
        Ok(Vec::new())
    }

    fn start_fetch(&mut self, user_id: UserId) -> RouterCommand {
        self.generation += 1;
        self.profile_loading = true;
        self.fetched_for = Some(user_id);
        debug!(user_id = %user_id, generation = self.generation, "requesting profile");

        RouterCommand::FetchProfile {
            user_id,
            generation: self.generation,
        }
    }

    fn reset_to_landing(&mut self) {
        if self.profile_loading {
            debug!(generation = self.generation, "session lost during profile fetch");
        }
        self.generation += 1;
        self.profile_loading = false;
        self.fetched_for = None;
        self.profile = None;
        self.commit(ViewState::Landing, "no session");
    }

    fn commit(&mut self, next: ViewState, reason: &'static str) {
        if self.view != next {
            info!(from = %self.view, to = %next, reason, "view transition");
            self.view = next;
        }
    }

    // ===== Getters =====

    /// The committed view, ignoring any loading overlay
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// What the UI should draw
    pub fn rendered(&self) -> RenderedView {
        if self.is_loading() {
            RenderedView::Loading
        } else {
            RenderedView::from(self.view)
        }
    }

    pub fn is_loading(&self) -> bool {
        self.auth_loading || self.profile_loading
    }

    pub fn session(&self) -> Option<UserId> {
        self.session
    }

    /// Last profile read back for the current session
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
