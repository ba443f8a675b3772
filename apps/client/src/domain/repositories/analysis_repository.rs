use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::calls::Analysis;
use crate::domain::user::UserId;

/// Repository trait for call analyses
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    /// All analyses of a user, newest first
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Analysis>>;

    /// The analysis attached to a recording, if the pipeline produced one
    async fn find_by_recording(&self, recording_id: Uuid) -> RepositoryResult<Option<Analysis>>;
}
