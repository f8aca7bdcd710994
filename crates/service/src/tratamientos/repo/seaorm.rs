use sea_orm::DatabaseConnection;

use models::errors::ModelError;
use models::tratamiento::{self, TratamientoData};

use crate::errors::ServiceError;
use crate::tratamientos::repository::TratamientoRepository;
use crate::tratamientos::serializers::CODIGO_TAKEN;
use crate::tratamientos::Tratamiento;
use crate::validation::{ValidationErrors, NON_FIELD_ERRORS};

pub struct SeaOrmTratamientoRepository {
    pub db: DatabaseConnection,
}

fn map_err(e: ModelError) -> ServiceError {
    match e {
        ModelError::Conflict(_) => ServiceError::Validation(ValidationErrors::single("codigo", CODIGO_TAKEN)),
        ModelError::Validation(m) => ServiceError::Validation(ValidationErrors::single(NON_FIELD_ERRORS, m)),
        other => ServiceError::Model(other),
    }
}

#[async_trait::async_trait]
impl TratamientoRepository for SeaOrmTratamientoRepository {
    async fn list_newest_first(&self) -> Result<Vec<Tratamiento>, ServiceError> {
        tratamiento::list_newest_first(&self.db).await.map_err(map_err)
    }

    async fn get(&self, id: i32) -> Result<Option<Tratamiento>, ServiceError> {
        tratamiento::find_by_id(&self.db, id).await.map_err(map_err)
    }

    async fn codigo_taken(&self, codigo: &str, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        let found = tratamiento::find_by_codigo(&self.db, codigo).await.map_err(map_err)?;
        Ok(found.is_some_and(|t| Some(t.id) != exclude_id))
    }

    async fn create(&self, data: TratamientoData) -> Result<Tratamiento, ServiceError> {
        tratamiento::create(&self.db, data).await.map_err(map_err)
    }

    async fn replace(&self, id: i32, data: TratamientoData) -> Result<Option<Tratamiento>, ServiceError> {
        tratamiento::replace(&self.db, id, data).await.map_err(map_err)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        tratamiento::delete(&self.db, id).await.map_err(map_err)
    }
}
