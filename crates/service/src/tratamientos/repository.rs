use async_trait::async_trait;

use models::tratamiento::TratamientoData;

use crate::errors::ServiceError;

use super::Tratamiento;

/// Storage seam for treatments. A duplicate `codigo` on write surfaces as
/// `ServiceError::Validation` keyed on `codigo`.
#[async_trait]
pub trait TratamientoRepository: Send + Sync {
    /// Every treatment, highest id first.
    async fn list_newest_first(&self) -> Result<Vec<Tratamiento>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<Tratamiento>, ServiceError>;
    /// Whether another row (not `exclude_id`) already uses `codigo`.
    async fn codigo_taken(&self, codigo: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError>;
    async fn create(&self, data: TratamientoData) -> Result<Tratamiento, ServiceError>;
    /// Overwrite every column of row `id`; `None` when it does not exist.
    async fn replace(&self, id: i32, data: TratamientoData) -> Result<Option<Tratamiento>, ServiceError>;
    /// `false` when there was nothing to delete.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use crate::tratamientos::serializers::CODIGO_TAKEN;
    use crate::validation::ValidationErrors;

    #[derive(Default)]
    pub struct MockTratamientoRepository {
        rows: Mutex<BTreeMap<i32, Tratamiento>>, // key: id
        last_id: Mutex<i32>,
    }

    fn conflict() -> ServiceError {
        ServiceError::Validation(ValidationErrors::single("codigo", CODIGO_TAKEN))
    }

    #[async_trait]
    impl TratamientoRepository for MockTratamientoRepository {
        async fn list_newest_first(&self) -> Result<Vec<Tratamiento>, ServiceError> {
            Ok(self.rows.lock().unwrap().values().rev().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<Tratamiento>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn codigo_taken(&self, codigo: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().any(|t| t.codigo == codigo && Some(t.id) != exclude_id))
        }

        async fn create(&self, data: TratamientoData) -> Result<Tratamiento, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|t| t.codigo == data.codigo) {
                return Err(conflict());
            }
            // ids are never reused, like a database sequence
            let mut last_id = self.last_id.lock().unwrap();
            *last_id += 1;
            let row = data.into_model(*last_id);
            rows.insert(row.id, row.clone());
            Ok(row)
        }

        async fn replace(&self, id: i32, data: TratamientoData) -> Result<Option<Tratamiento>, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|t| t.codigo == data.codigo && t.id != id) {
                return Err(conflict());
            }
            match rows.get_mut(&id) {
                Some(slot) => {
                    *slot = data.into_model(id);
                    Ok(Some(slot.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }
}
