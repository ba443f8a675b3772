// View router domain module
// Session/profile resolution state machine that picks the active screen

#![allow(clippy::module_inception)]

pub mod errors;
pub mod events;
pub mod machine;
pub mod view;

pub use errors::RouterError;
pub use events::{FetchOutcome, RouterCommand, RouterEvent, UserIntent};
pub use machine::ViewRouter;
pub use view::{RenderedView, ViewState};
