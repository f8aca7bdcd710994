use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument};

use crate::errors::ServiceError;

use super::repository::TratamientoRepository;
use super::serializers::{self, candidate_codigo, Representation, SerializerKind};
use super::Tratamiento;

/// Request action, used to pick the serializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Retrieve,
    Update,
    PartialUpdate,
    Destroy,
}

impl Action {
    /// Listing renders summaries, every other action renders details.
    pub fn serializer(self) -> SerializerKind {
        match self {
            Action::List => SerializerKind::Summary,
            _ => SerializerKind::Detail,
        }
    }
}

/// CRUD over treatments. Authentication happens before any of these are
/// reached.
#[derive(Clone)]
pub struct TratamientoViewSet {
    repo: Arc<dyn TratamientoRepository>,
}

/// Path ids that are not integers can never match a row.
fn parse_pk(pk: &str) -> Option<i32> {
    pk.trim().parse().ok()
}

impl TratamientoViewSet {
    pub fn new(repo: Arc<dyn TratamientoRepository>) -> Self { Self { repo } }

    async fn get_object(&self, pk: &str) -> Result<Tratamiento, ServiceError> {
        let Some(id) = parse_pk(pk) else { return Err(ServiceError::not_found("tratamiento")); };
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("tratamiento"))
    }

    async fn is_codigo_taken(&self, payload: &Value, exclude_id: Option<i32>) -> Result<bool, ServiceError> {
        match candidate_codigo(payload) {
            Some(codigo) => self.repo.codigo_taken(&codigo, exclude_id).await,
            None => Ok(false),
        }
    }

    pub async fn list(&self) -> Result<Vec<Representation>, ServiceError> {
        let kind = Action::List.serializer();
        let rows = self.repo.list_newest_first().await?;
        Ok(rows.iter().map(|t| kind.represent(t)).collect())
    }

    pub async fn retrieve(&self, pk: &str) -> Result<Representation, ServiceError> {
        let t = self.get_object(pk).await?;
        Ok(Action::Retrieve.serializer().represent(&t))
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: &Value) -> Result<Representation, ServiceError> {
        let taken = self.is_codigo_taken(payload, None).await?;
        let data = serializers::validate(payload, None, false, taken)?;
        let t = self.repo.create(data).await?;
        info!(id = t.id, codigo = %t.codigo, "tratamiento_created");
        Ok(Action::Create.serializer().represent(&t))
    }

    /// Full (`partial == false`) or partial update of an existing row.
    #[instrument(skip(self, payload))]
    pub async fn update(&self, pk: &str, payload: &Value, partial: bool) -> Result<Representation, ServiceError> {
        let instance = self.get_object(pk).await?;
        let taken = self.is_codigo_taken(payload, Some(instance.id)).await?;
        let data = serializers::validate(payload, Some(&instance), partial, taken)?;
        let t = self
            .repo
            .replace(instance.id, data)
            .await?
            .ok_or_else(|| ServiceError::not_found("tratamiento"))?;
        info!(id = t.id, partial, "tratamiento_updated");
        let action = if partial { Action::PartialUpdate } else { Action::Update };
        Ok(action.serializer().represent(&t))
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, pk: &str) -> Result<(), ServiceError> {
        let Some(id) = parse_pk(pk) else { return Err(ServiceError::not_found("tratamiento")); };
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("tratamiento"));
        }
        info!(id, "tratamiento_deleted");
        Ok(())
    }
}
