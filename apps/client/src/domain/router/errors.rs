use thiserror::Error;

use super::events::UserIntent;
use super::view::RenderedView;

/// Errors raised when a request cannot be applied to the view router
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("Invalid transition: {intent} is not available from {from}")]
    InvalidTransition {
        from: RenderedView,
        intent: UserIntent,
    },

    #[error("No active session")]
    NoSession,
}
