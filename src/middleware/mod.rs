pub mod auth;
pub mod json;

pub use auth::{authenticate, AuthUser};
pub use json::JsonBody;
