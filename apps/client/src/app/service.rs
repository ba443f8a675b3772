use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::errors::{AppError, AppResult};
use crate::domain::profile::{OnboardingDetails, UserProfile};
use crate::domain::repositories::ProfileRepository;
use crate::domain::router::{
    FetchOutcome, RenderedView, RouterCommand, RouterError, RouterEvent, UserIntent, ViewRouter,
};
use crate::domain::session::AuthState;

const INTENT_QUEUE_DEPTH: usize = 16;

type IntentRequest = (UserIntent, oneshot::Sender<Result<(), RouterError>>);

/// Single task that owns the [`ViewRouter`]
///
/// Auth changes, navigation changes, UI intents and finished profile
/// fetches are all funnelled into one loop, so every transition is applied
/// in order on one owner. Profile lookups run as spawned tasks and report
/// back through a channel stamped with their generation.
pub struct ViewRouterService {
    router: ViewRouter,
    profiles: Arc<dyn ProfileRepository>,
    auth_rx: watch::Receiver<AuthState>,
    nav_rx: watch::Receiver<Option<String>>,
    intent_rx: mpsc::Receiver<IntentRequest>,
    fetch_tx: mpsc::UnboundedSender<RouterEvent>,
    fetch_rx: mpsc::UnboundedReceiver<RouterEvent>,
    view_tx: watch::Sender<RenderedView>,
}

/// Cloneable front end to a running [`ViewRouterService`]
#[derive(Clone)]
pub struct RouterHandle {
    intent_tx: mpsc::Sender<IntentRequest>,
    view_rx: watch::Receiver<RenderedView>,
    auth_rx: watch::Receiver<AuthState>,
    profiles: Arc<dyn ProfileRepository>,
}

impl ViewRouterService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        auth_rx: watch::Receiver<AuthState>,
        nav_rx: watch::Receiver<Option<String>>,
    ) -> (Self, RouterHandle) {
        let router = ViewRouter::new();
        let (intent_tx, intent_rx) = mpsc::channel(INTENT_QUEUE_DEPTH);
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(router.rendered());

        let handle = RouterHandle {
            intent_tx,
            view_rx,
            auth_rx: auth_rx.clone(),
            profiles: Arc::clone(&profiles),
        };

        let service = Self {
            router,
            profiles,
            auth_rx,
            nav_rx,
            intent_rx,
            fetch_tx,
            fetch_rx,
            view_tx,
        };

        (service, handle)
    }

    /// Builds the service and runs it on the current runtime
    pub fn spawn(
        profiles: Arc<dyn ProfileRepository>,
        auth_rx: watch::Receiver<AuthState>,
        nav_rx: watch::Receiver<Option<String>>,
    ) -> (RouterHandle, JoinHandle<()>) {
        let (service, handle) = Self::new(profiles, auth_rx, nav_rx);
        (handle, tokio::spawn(service.run()))
    }

    /// Event loop; ends when the auth source or every handle is dropped
    pub async fn run(mut self) {
        let tab = self.nav_rx.borrow_and_update().clone();
        self.apply_background(RouterEvent::NavigationChanged { tab });
        let auth = self.auth_rx.borrow_and_update().clone();
        self.apply_background(RouterEvent::AuthChanged(auth));

        let mut nav_open = true;
        loop {
            tokio::select! {
                changed = self.auth_rx.changed() => {
                    if changed.is_err() {
                        info!("auth source closed, stopping view router");
                        break;
                    }
                    let state = self.auth_rx.borrow_and_update().clone();
                    self.apply_background(RouterEvent::AuthChanged(state));
                }
                changed = self.nav_rx.changed(), if nav_open => {
                    match changed {
                        Ok(()) => {
                            let tab = self.nav_rx.borrow_and_update().clone();
                            self.apply_background(RouterEvent::NavigationChanged { tab });
                        }
                        Err(_) => nav_open = false,
                    }
                }
                request = self.intent_rx.recv() => {
                    let Some((intent, reply)) = request else {
                        info!("all router handles dropped, stopping view router");
                        break;
                    };
                    let result = self.apply(RouterEvent::Intent(intent));
                    if let Err(e) = &result {
                        debug!(error = %e, "intent rejected");
                    }
                    let _ = reply.send(result);
                }
                Some(event) = self.fetch_rx.recv() => {
                    self.apply_background(event);
                }
            }
        }
    }

    fn apply(&mut self, event: RouterEvent) -> Result<(), RouterError> {
        for command in self.router.handle(event)? {
            self.execute(command);
        }

        let rendered = self.router.rendered();
        self.view_tx.send_if_modified(|current| {
            if *current == rendered {
                return false;
            }
            *current = rendered;
            true
        });
        Ok(())
    }

    fn apply_background(&mut self, event: RouterEvent) {
        if let Err(e) = self.apply(event) {
            warn!(error = %e, "router rejected event");
        }
    }

    fn execute(&self, command: RouterCommand) {
        match command {
            RouterCommand::FetchProfile {
                user_id,
                generation,
            } => {
                let profiles = Arc::clone(&self.profiles);
                let done = self.fetch_tx.clone();

                tokio::spawn(async move {
                    let outcome = match profiles.find_by_user_id(user_id).await {
                        Ok(Some(profile)) => FetchOutcome::Found(profile),
                        Ok(None) => FetchOutcome::Missing,
                        Err(e) => FetchOutcome::Failed(e.to_string()),
                    };
                    let _ = done.send(RouterEvent::ProfileFetched {
                        generation,
                        outcome,
                    });
                });
            }
        }
    }
}

impl RouterHandle {
    /// What the UI should draw right now
    pub fn view(&self) -> RenderedView {
        *self.view_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RenderedView> {
        self.view_rx.clone()
    }

    /// Waits until the router is no longer loading
    pub async fn settled(&self) -> AppResult<RenderedView> {
        let mut rx = self.view_rx.clone();
        let view = *rx
            .wait_for(|view| *view != RenderedView::Loading)
            .await
            .map_err(|_| AppError::Closed)?;
        Ok(view)
    }

    /// Raises a view callback
    pub async fn dispatch(&self, intent: UserIntent) -> AppResult<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.intent_tx
            .send((intent, reply_tx))
            .await
            .map_err(|_| AppError::Closed)?;

        reply_rx.await.map_err(|_| AppError::Closed)??;
        Ok(())
    }

    /// Writes the onboarding answers, then raises onboarding-complete
    ///
    /// The stored profile is read first and the answers are merged into it;
    /// if that read fails nothing is written. The dashboard is only reached
    /// if the profile read back afterwards is complete.
    pub async fn submit_onboarding(&self, details: &OnboardingDetails) -> AppResult<UserProfile> {
        details.validate()?;

        let from = self.view();
        if !from.accepts(UserIntent::OnboardingComplete) {
            return Err(RouterError::InvalidTransition {
                from,
                intent: UserIntent::OnboardingComplete,
            }
            .into());
        }

        let session = self
            .auth_rx
            .borrow()
            .session
            .clone()
            .ok_or(RouterError::NoSession)?;

        // Answers are merged into the stored row; no write without it
        let existing = self
            .profiles
            .find_by_user_id(session.user_id)
            .await
            .map_err(|e| {
                warn!(error = %e, "could not read existing profile, onboarding not saved");
                e
            })?;

        let profile = details.apply(
            session.user_id,
            session.email.as_deref().unwrap_or_default(),
            existing,
        )?;
        let saved = self.profiles.upsert(&profile).await?;
        info!(user_id = %session.user_id, "onboarding saved");

        self.dispatch(UserIntent::OnboardingComplete).await?;
        Ok(saved)
    }
}
