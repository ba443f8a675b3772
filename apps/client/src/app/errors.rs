use thiserror::Error;

use crate::domain::profile::OnboardingError;
use crate::domain::repositories::RepositoryError;
use crate::domain::router::RouterError;

/// Errors surfaced to callers of the running view router
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Onboarding(#[from] OnboardingError),

    #[error("Failed to save profile: {0}")]
    Repository(#[from] RepositoryError),

    #[error("View router has stopped")]
    Closed,
}

pub type AppResult<T> = Result<T, AppError>;
