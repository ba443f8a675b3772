use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Named bucket of leads owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadGroup {
    pub id: Uuid,
    pub user_id: UserId,
    pub group_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sales lead
///
/// `other` holds arbitrary extra columns from imports. `lead_groups` is only
/// populated when the query embeds the group relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub contact: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub other: Option<serde_json::Value>,
    #[serde(default)]
    pub group_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing)]
    pub lead_groups: Option<LeadGroup>,
}

impl Lead {
    /// Name of the embedded group, if one was joined
    pub fn group_name(&self) -> Option<&str> {
        self.lead_groups.as_ref().map(|g| g.group_name.as_str())
    }
}
