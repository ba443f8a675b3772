// Domain layer module exports
// Following Hexagonal Architecture: entities, ports and the view router
// Domain is independent of infrastructure concerns

pub mod calls;
pub mod leads;
pub mod profile;
pub mod repositories;
pub mod router;
pub mod session;
pub mod user;
