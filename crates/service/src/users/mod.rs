//! Users: repository abstraction, password hashing and the manager that
//! enforces creation invariants (email present and normalized, password hashed).

pub mod errors;
pub mod manager;
pub mod password;
pub mod registration;
pub mod repository;
pub mod repo;

pub use errors::UserError;
pub use manager::{normalize_email, ExtraFields, UserManager};
pub use registration::RegisterInput;

/// Stored user row.
pub type User = models::user::Model;
