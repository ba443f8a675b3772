// Auth module
// Access-token decoding and the observable session capability

pub mod jwt;
pub mod state;

pub use jwt::{AuthError, Claims};
pub use state::AuthHandle;
