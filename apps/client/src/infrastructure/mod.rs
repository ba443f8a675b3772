// Infrastructure layer module
// Adapters for the hosted backend's REST data API
// Follows Hexagonal Architecture

pub mod repositories;
pub mod rest;
