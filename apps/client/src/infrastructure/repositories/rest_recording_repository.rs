use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::calls::Recording;
use crate::domain::repositories::{RecordingRepository, RepositoryResult};
use crate::domain::user::UserId;
use crate::infrastructure::rest::{Query, RestClient};

const TABLE: &str = "recordings";

/// REST implementation of RecordingRepository
pub struct RestRecordingRepository {
    client: Arc<RestClient>,
}

impl RestRecordingRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordingRepository for RestRecordingRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Recording>> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", false);
        self.client.fetch_all(&query).await
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Recording>> {
        let query = Query::from(TABLE).select("*").eq("id", id);
        self.client.fetch_maybe_single(&query).await
    }
}
