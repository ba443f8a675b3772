// Application layer
// Drives the view router from auth, navigation and UI events

pub mod errors;
pub mod service;

pub use errors::AppError;
pub use service::{RouterHandle, ViewRouterService};
