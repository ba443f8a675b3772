use async_trait::async_trait;
use chrono::NaiveDate;

use super::errors::RepositoryResult;
use crate::domain::calls::MetricsAggregate;
use crate::domain::user::UserId;

/// Repository trait for daily metric rollups
#[async_trait]
pub trait MetricsRepository: Send + Sync {
    /// Rollups with `from <= date <= to`, oldest first
    async fn find_by_user_in_range(
        &self,
        user_id: UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> RepositoryResult<Vec<MetricsAggregate>>;
}
