//! Callsight client library
//!
//! Session/profile view routing and typed data access for the Callsight
//! call-analysis app, over a hosted auth + REST data backend.

pub mod app;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
