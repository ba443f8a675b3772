use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::jwt::{session_from_token, AuthError};
use crate::domain::session::{AuthState, Session};

/// Owner of the observable auth state
///
/// The auth flow writes through this handle; everything else only holds a
/// receiver from [`AuthHandle::subscribe`] and reacts to changes.
#[derive(Clone)]
pub struct AuthHandle {
    tx: Arc<watch::Sender<AuthState>>,
}

impl Default for AuthHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthHandle {
    /// Starts in the checking state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::checking());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    /// Marks a session check as in flight, keeping the known session
    pub fn begin_check(&self) {
        self.tx.send_modify(|state| state.loading = true);
    }

    /// Publishes a live session
    ///
    /// Coming from no session starts a new epoch; replacing the session of a
    /// signed-in user (a token refresh) keeps it.
    pub fn sign_in(&self, session: Session) {
        info!(user_id = %session.user_id, "signed in");
        self.tx.send_modify(|state| {
            let epoch = match &state.session {
                Some(_) => state.epoch,
                None => state.epoch + 1,
            };
            *state = AuthState::signed_in(session).with_epoch(epoch);
        });
    }

    /// Signs in from a raw access token
    ///
    /// A token that cannot be read ends the check signed out.
    pub fn sign_in_with_token(&self, token: &str, secret: Option<&str>) -> Result<(), AuthError> {
        match session_from_token(token, secret) {
            Ok(session) => {
                self.sign_in(session);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "rejecting access token");
                self.sign_out();
                Err(e)
            }
        }
    }

    pub fn sign_out(&self) {
        self.tx.send_modify(|state| {
            let mut epoch = state.epoch;
            if state.session.is_some() {
                info!("signed out");
                epoch += 1;
            }
            *state = AuthState::signed_out().with_epoch(epoch);
        });
    }
}
