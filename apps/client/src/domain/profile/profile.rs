use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::UserId;

/// Per-user profile record stored in the `user_profiles` table
///
/// # Invariants
/// - At most one profile exists per `user_id`
/// - The router reads profiles but never writes them; only the onboarding
///   flow does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub user_id: UserId,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
    #[serde(default)]
    pub company_industry: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub use_cases: Option<Vec<String>>,
    #[serde(default)]
    pub onboarding_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Whether the user counts as onboarded
    ///
    /// True when the completion flag is set, or when full name, company name
    /// and position are all filled in even though the flag never flipped.
    ///
    /// # Example
    /// ```
    /// use callsight_client::domain::profile::UserProfile;
    /// use callsight_client::domain::user::UserId;
    /// use uuid::Uuid;
    ///
    /// let mut profile = UserProfile::empty(UserId::new(Uuid::new_v4()), "jane@acme.io");
    /// assert!(!profile.is_complete());
    ///
    /// profile.onboarding_completed = true;
    /// assert!(profile.is_complete());
    /// ```
    pub fn is_complete(&self) -> bool {
        self.onboarding_completed
            || (is_filled(&self.full_name)
                && is_filled(&self.company_name)
                && is_filled(&self.position))
    }

    /// A fresh profile with nothing but identity filled in
    pub fn empty(user_id: UserId, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email: email.into(),
            full_name: None,
            avatar_url: None,
            company_name: None,
            company_email: None,
            company_industry: None,
            position: None,
            use_cases: None,
            onboarding_completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}
