use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Processing status of an uploaded recording
///
/// # Pipeline
/// ```text
/// pending/uploaded -> queued -> processing -> transcribing -> analyzing -> completed
///                                    any non-terminal state ---> failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Pending,
    Uploaded,
    Queued,
    Processing,
    Transcribing,
    Analyzing,
    Completed,
    Failed,
}

impl RecordingStatus {
    /// No further work will happen on the recording
    pub fn is_terminal(&self) -> bool {
        matches!(self, RecordingStatus::Completed | RecordingStatus::Failed)
    }

    /// The backend pipeline is actively working on the recording
    pub fn is_in_progress(&self) -> bool {
        matches!(
            self,
            RecordingStatus::Processing | RecordingStatus::Transcribing | RecordingStatus::Analyzing
        )
    }
}

impl std::fmt::Display for RecordingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordingStatus::Pending => write!(f, "pending"),
            RecordingStatus::Uploaded => write!(f, "uploaded"),
            RecordingStatus::Queued => write!(f, "queued"),
            RecordingStatus::Processing => write!(f, "processing"),
            RecordingStatus::Transcribing => write!(f, "transcribing"),
            RecordingStatus::Analyzing => write!(f, "analyzing"),
            RecordingStatus::Completed => write!(f, "completed"),
            RecordingStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A call recording row from the `recordings` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(default)]
    pub drive_file_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(default)]
    pub stored_file_url: Option<String>,
    #[serde(default)]
    pub status: Option<RecordingStatus>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recording {
    /// Name to show for the recording, falling back to its id
    pub fn display_name(&self) -> String {
        self.file_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.id.to_string())
    }
}
