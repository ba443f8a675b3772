// Profile domain module
// Per-user onboarding and company record, plus the onboarding payload

#![allow(clippy::module_inception)]

pub mod onboarding;
pub mod profile;

pub use onboarding::{OnboardingDetails, OnboardingError};
pub use profile::UserProfile;
