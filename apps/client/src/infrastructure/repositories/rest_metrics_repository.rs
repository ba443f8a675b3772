use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::calls::MetricsAggregate;
use crate::domain::repositories::{MetricsRepository, RepositoryResult};
use crate::domain::user::UserId;
use crate::infrastructure::rest::{Query, RestClient};

const TABLE: &str = "metrics_aggregates";

/// REST implementation of MetricsRepository
pub struct RestMetricsRepository {
    client: Arc<RestClient>,
}

impl RestMetricsRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MetricsRepository for RestMetricsRepository {
    async fn find_by_user_in_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<MetricsAggregate>> {
        let query = Query::from(TABLE)
            .select("*")
            .eq("user_id", user_id)
            .gte("date", from)
            .lte("date", to)
            .order("date", true);
        self.client.fetch_all(&query).await
    }
}
