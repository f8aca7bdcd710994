use sea_orm::DatabaseConnection;

use models::user::NewUser;

use crate::users::errors::UserError;
use crate::users::repository::UserRepository;
use crate::users::User;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn insert(&self, new: NewUser) -> Result<User, UserError> {
        Ok(models::user::insert(&self.db, new).await?)
    }

    async fn save(&self, user: User) -> Result<User, UserError> {
        Ok(models::user::save(&self.db, user).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError> {
        Ok(models::user::find_by_id(&self.db, id).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(models::user::find_by_email(&self.db, email).await?)
    }
}
