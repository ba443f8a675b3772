use async_trait::async_trait;
use uuid::Uuid;

use super::errors::RepositoryResult;
use crate::domain::leads::{Lead, LeadGroup};
use crate::domain::user::UserId;

/// Repository trait for leads and lead groups
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// All leads of a user with their group embedded, newest first
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Lead>>;

    async fn find_by_group(&self, group_id: Uuid) -> RepositoryResult<Vec<Lead>>;

    /// Groups of a user ordered by name
    async fn find_groups(&self, user_id: UserId) -> RepositoryResult<Vec<LeadGroup>>;
}
