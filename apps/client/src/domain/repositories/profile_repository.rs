use async_trait::async_trait;

use super::errors::RepositoryResult;
use crate::domain::profile::UserProfile;
use crate::domain::user::UserId;

/// Repository trait for user profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find the profile of a user
    ///
    /// Returns `Ok(None)` when no row exists; more than one row is an error.
    async fn find_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>>;

    /// Insert or replace the profile keyed by its `user_id`
    async fn upsert(&self, profile: &UserProfile) -> RepositoryResult<UserProfile>;
}
