// handlers/public/mod.rs - Endpoints that never require a token
//
// Liveness, health and token acquisition.

pub mod health;
pub mod token;

pub use health::{health, root};
pub use token::issue_token;
