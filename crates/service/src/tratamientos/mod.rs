//! Treatments: the summary/detail serializers, the repository seam and the
//! viewset that binds CRUD actions to them.

pub mod repository;
pub mod repo;
pub mod serializers;
pub mod viewset;

pub use serializers::{Representation, SerializerKind};
pub use viewset::{Action, TratamientoViewSet};

/// Stored treatment row.
pub type Tratamiento = models::tratamiento::Model;
