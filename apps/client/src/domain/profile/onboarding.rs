use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::profile::UserProfile;
use crate::domain::user::{Email, UserId};

/// Errors raised while validating an onboarding submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OnboardingError {
    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    #[error("Invalid company email: {0}")]
    InvalidCompanyEmail(String),
}

/// What the onboarding flow collects before the profile is written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingDetails {
    pub full_name: String,
    pub company_name: String,
    pub position: String,
    pub company_email: Option<String>,
    pub company_industry: Option<String>,
    pub use_cases: Vec<String>,
}

impl OnboardingDetails {
    /// Checks the submission before anything is sent to the backend
    ///
    /// # Business Rules
    /// - Full name, company name and position must be non-blank
    /// - Company email, when given, must be a valid email
    pub fn validate(&self) -> Result<(), OnboardingError> {
        if self.full_name.trim().is_empty() {
            return Err(OnboardingError::MissingField("Full name"));
        }
        if self.company_name.trim().is_empty() {
            return Err(OnboardingError::MissingField("Company name"));
        }
        if self.position.trim().is_empty() {
            return Err(OnboardingError::MissingField("Position"));
        }
        if let Some(company_email) = &self.company_email {
            Email::new(company_email.as_str())
                .map_err(|_| OnboardingError::InvalidCompanyEmail(company_email.clone()))?;
        }
        Ok(())
    }

    /// Produces the profile to write back, merged over any existing record
    ///
    /// The result always has `onboarding_completed` set. An existing record
    /// keeps its id, avatar and creation time.
    pub fn apply(
        &self,
        user_id: UserId,
        email: &str,
        existing: Option<UserProfile>,
    ) -> Result<UserProfile, OnboardingError> {
        self.validate()?;

        let mut profile = existing
            .filter(|p| p.user_id == user_id)
            .unwrap_or_else(|| UserProfile::empty(user_id, email));

        profile.full_name = Some(self.full_name.trim().to_string());
        profile.company_name = Some(self.company_name.trim().to_string());
        profile.position = Some(self.position.trim().to_string());
        profile.company_email = self.company_email.clone();
        profile.company_industry = self.company_industry.clone();
        profile.use_cases = Some(self.use_cases.clone());
        profile.onboarding_completed = true;
        profile.updated_at = Utc::now();

        Ok(profile)
    }
}
