use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Daily rollup of a user's call metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsAggregate {
    pub id: Uuid,
    pub user_id: UserId,
    pub date: NaiveDate,
    #[serde(default)]
    pub total_calls: Option<u32>,
    #[serde(default)]
    pub avg_sentiment: Option<f64>,
    #[serde(default)]
    pub avg_engagement: Option<f64>,
    #[serde(default)]
    pub conversion_rate: Option<f64>,
    #[serde(default)]
    pub objections_rate: Option<f64>,
}
