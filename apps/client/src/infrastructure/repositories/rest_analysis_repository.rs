use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::calls::Analysis;
use crate::domain::repositories::{AnalysisRepository, RepositoryResult};
use crate::domain::user::UserId;
use crate::infrastructure::rest::{Query, RestClient};

const TABLE: &str = "analyses";

/// REST implementation of AnalysisRepository
pub struct RestAnalysisRepository {
    client: Arc<RestClient>,
}

impl RestAnalysisRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AnalysisRepository for RestAnalysisRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Analysis>> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .order("created_at", false);
        self.client.fetch_all(&query).await
    }

    async fn find_by_recording(&self, recording_id: Uuid) -> RepositoryResult<Option<Analysis>> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("recording_id", recording_id);
        self.client.fetch_maybe_single(&query).await
    }
}
