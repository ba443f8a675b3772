use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Analysis of a single call, written by the backend pipeline
///
/// `detailed_call_analysis` and `participants` are free-form documents and
/// are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: Uuid,
    #[serde(default)]
    pub recording_id: Option<Uuid>,
    pub user_id: UserId,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    #[serde(default)]
    pub engagement_score: Option<f64>,
    #[serde(default)]
    pub confidence_score_executive: Option<f64>,
    #[serde(default)]
    pub confidence_score_person: Option<f64>,
    #[serde(default)]
    pub objections_handled: Option<String>,
    #[serde(default)]
    pub next_steps: Option<String>,
    #[serde(default)]
    pub improvements: Option<String>,
    #[serde(default)]
    pub call_outcome: Option<String>,
    #[serde(default)]
    pub detailed_call_analysis: Option<serde_json::Value>,
    #[serde(default)]
    pub short_summary: Option<String>,
    #[serde(default)]
    pub participants: Option<serde_json::Value>,
    #[serde(default)]
    pub objections_raised: Option<u32>,
    #[serde(default)]
    pub objections_tackled: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Analysis {
    /// Share of raised objections that were tackled
    ///
    /// `None` when no objections were recorded.
    pub fn objection_handling_ratio(&self) -> Option<f64> {
        match (self.objections_raised, self.objections_tackled) {
            (Some(raised), tackled) if raised > 0 => {
                Some(f64::from(tackled.unwrap_or(0).min(raised)) / f64::from(raised))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(raised: Option<u32>, tackled: Option<u32>) -> Analysis {
        let row = serde_json::json!({
            "id": "8c7d7a4e-1f4b-4f7e-8b8e-2d7c0b5a9e01",
            "user_id": "5f0c1a52-7d3b-4a3e-9a55-0f4f0c6d2b11",
            "objections_raised": raised,
            "objections_tackled": tackled,
            "participants": {"rep": "Jane", "prospect": ["Bob"]},
            "created_at": "2025-01-10T12:00:00Z"
        });
        serde_json::from_value(row).unwrap()
    }

    #[test]
    fn ratio_of_tackled_objections() {
        assert_eq!(analysis(Some(4), Some(3)).objection_handling_ratio(), Some(0.75));
    }

    #[test]
    fn ratio_absent_without_objections() {
        assert_eq!(analysis(Some(0), Some(0)).objection_handling_ratio(), None);
        assert_eq!(analysis(None, Some(2)).objection_handling_ratio(), None);
    }

    #[test]
    fn ratio_capped_at_one() {
        assert_eq!(analysis(Some(2), Some(5)).objection_handling_ratio(), Some(1.0));
    }

    #[test]
    fn participants_pass_through() {
        let a = analysis(None, None);
        assert_eq!(a.participants.unwrap()["prospect"][0], "Bob");
    }
}
