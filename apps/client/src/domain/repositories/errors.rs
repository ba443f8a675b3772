use thiserror::Error;

/// Errors returned by data access against the hosted backend
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Row-level security or a rejected token refused the request
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Expected at most one row from {table}")]
    MultipleRows { table: String },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
