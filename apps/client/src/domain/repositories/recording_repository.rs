use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::calls::Recording;
use crate::domain::user::UserId;

/// Repository trait for call recordings
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    /// All recordings of a user, newest first
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Recording>>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Recording>>;
}
