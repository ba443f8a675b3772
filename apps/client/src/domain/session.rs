use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Authenticated identity handed out by the hosted auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: Option<String>,
    pub access_token: String,
}

/// Snapshot of the auth subsystem as observed by the client
///
/// `loading` is true while a session check is in flight; `session` is only
/// meaningful once it goes back to false.
///
/// `epoch` counts session-presence transitions (a sign-in after no session,
/// or a sign-out of a live session). Observers that only see the latest
/// snapshot use it to notice a sign-out and sign-in of the same user that
/// arrived together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub loading: bool,
    pub session: Option<Session>,
    pub epoch: u64,
}

impl AuthState {
    pub fn checking() -> Self {
        Self {
            loading: true,
            session: None,
            epoch: 0,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            loading: false,
            session: None,
            epoch: 0,
        }
    }

    pub fn signed_in(session: Session) -> Self {
        Self {
            loading: false,
            session: Some(session),
            epoch: 0,
        }
    }

    /// Same snapshot stamped with a session epoch
    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.session.as_ref().map(|s| s.user_id)
    }
}
