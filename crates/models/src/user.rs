use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter};
use serde::Serialize;

use crate::errors::ModelError;

pub const EMAIL_MAX_LEN: usize = 255;
pub const NAME_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub phone: Option<i32>,
    pub leaving_date: Option<Date>,
    pub last_login: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a user that has not been stored yet. `password` must
/// already be hashed.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub phone: Option<i32>,
    pub leaving_date: Option<Date>,
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(ModelError::Validation("invalid email".into()));
    };
    if local.is_empty() || domain.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(ModelError::Validation("invalid email".into()));
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(ModelError::Validation(format!("email longer than {EMAIL_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.chars().count() > NAME_MAX_LEN {
        return Err(ModelError::Validation(format!("name longer than {NAME_MAX_LEN} characters")));
    }
    Ok(())
}

pub async fn insert(db: &DatabaseConnection, new: NewUser) -> Result<Model, ModelError> {
    if new.email.is_empty() { return Err(ModelError::Validation("email required".into())); }
    if new.password.is_empty() { return Err(ModelError::Validation("password hash required".into())); }
    validate_name(&new.name)?;
    let am = ActiveModel {
        email: Set(new.email),
        name: Set(new.name),
        password: Set(new.password),
        is_active: Set(new.is_active),
        is_staff: Set(new.is_staff),
        is_superuser: Set(new.is_superuser),
        phone: Set(new.phone),
        leaving_date: Set(new.leaving_date),
        last_login: Set(None),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::from_db(e, "user with this email already exists"))
}

/// Write every column of `user` back to its row.
pub async fn save(db: &DatabaseConnection, user: Model) -> Result<Model, ModelError> {
    let am = ActiveModel::from(user).reset_all();
    am.update(db).await.map_err(|e| ModelError::from_db(e, "user with this email already exists"))
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email)).one(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
