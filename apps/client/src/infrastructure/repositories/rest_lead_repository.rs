use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::leads::{Lead, LeadGroup};
use crate::domain::repositories::{LeadRepository, RepositoryResult};
use crate::domain::user::UserId;
use crate::infrastructure::rest::{Query, RestClient};

const LEADS: &str = "leads";
const GROUPS: &str = "lead_groups";

/// REST implementation of LeadRepository
///
/// Lead reads embed the owning group through the `group_id` foreign key.
pub struct RestLeadRepository {
    client: Arc<RestClient>,
}

impl RestLeadRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LeadRepository for RestLeadRepository {
    async fn find_by_user(&self, user_id: UserId) -> RepositoryResult<Vec<Lead>> {
        let query = Query::from(LEADS)
            .select("*,lead_groups(*)")
            .eq("user_id", user_id)
            .order("created_at", false);
        self.client.fetch_all(&query).await
    }

    async fn find_by_group(&self, group_id: Uuid) -> RepositoryResult<Vec<Lead>> {
        let query = Query::from(LEADS)
            .select("*,lead_groups(*)")
            .eq("group_id", group_id)
            .order("created_at", false);
        self.client.fetch_all(&query).await
    }

    async fn find_groups(&self, user_id: UserId) -> RepositoryResult<Vec<LeadGroup>> {
        let query = Query::from(GROUPS)
            .select("*")
            .eq("user_id", user_id)
            .order("group_name", true);
        self.client.fetch_all(&query).await
    }
}
