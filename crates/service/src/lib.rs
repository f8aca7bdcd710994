//! Service layer providing business-oriented operations on top of models.
//! - User manager: email normalization and password hashing before persistence.
//! - Auth service: credential checks and bearer token issuance/validation.
//! - Tratamientos: serializers and the viewset driving CRUD over a repository.

pub mod errors;
pub mod validation;
pub mod users;
pub mod auth;
pub mod tratamientos;
#[cfg(test)]
pub mod test_support;
