//! Auth module: token issuance for valid credentials and token validation
//! for protected routes.
//!
//! Persistence goes through `users::repository::UserRepository`.

pub mod domain;
pub mod errors;
pub mod service;

pub use service::AuthService;
