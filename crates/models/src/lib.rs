//! SeaORM entities for the clinic backend plus the storage-level
//! validation each entity enforces before a write.

pub mod errors;
pub mod db;
pub mod user;
pub mod tratamiento;

#[cfg(test)]
mod tests;
