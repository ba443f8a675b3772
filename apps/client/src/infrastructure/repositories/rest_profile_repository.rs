use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::profile::UserProfile;
use crate::domain::repositories::{ProfileRepository, RepositoryResult};
use crate::domain::user::UserId;
use crate::infrastructure::rest::{Query, RestClient};

const TABLE: &str = "user_profiles";

/// REST implementation of ProfileRepository
pub struct RestProfileRepository {
    client: Arc<RestClient>,
}

impl RestProfileRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn find_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>> {
        let query = Query::from(TABLE).select("*").eq("user_id", user_id);
        self.client.fetch_maybe_single(&query).await
    }

    async fn upsert(&self, profile: &UserProfile) -> RepositoryResult<UserProfile> {
        self.client.upsert(TABLE, "user_id", profile).await
    }
}
