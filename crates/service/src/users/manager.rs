use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use models::user::NewUser;

use super::errors::UserError;
use super::password;
use super::repository::UserRepository;
use super::User;

/// Lower-case the domain part of an email address, leaving the local part
/// untouched. Input without an `@` is returned as-is.
pub fn normalize_email(email: &str) -> String {
    match email.trim().rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Optional columns accepted by [`UserManager::create_user`].
#[derive(Debug, Clone)]
pub struct ExtraFields {
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub phone: Option<i32>,
    pub leaving_date: Option<NaiveDate>,
}

impl Default for ExtraFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            phone: None,
            leaving_date: None,
        }
    }
}

impl ExtraFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }
}

/// Factory for users; every write goes through the owned repository.
#[derive(Clone)]
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// Create, save and return a new user.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::users::{ExtraFields, UserManager, repository::mock::MockUserRepository};
    /// let manager = UserManager::new(Arc::new(MockUserRepository::default()));
    /// let user = tokio_test::block_on(manager.create_user("Test2@Example.com", Some("sample123"), ExtraFields::default())).unwrap();
    /// assert_eq!(user.email, "Test2@example.com");
    /// assert!(UserManager::check_password(&user, "sample123"));
    /// ```
    #[instrument(skip(self, email, password, extra), fields(email = %email))]
    pub async fn create_user(&self, email: &str, password: Option<&str>, extra: ExtraFields) -> Result<User, UserError> {
        if email.is_empty() {
            return Err(UserError::MissingEmail);
        }
        let new = NewUser {
            email: normalize_email(email),
            name: extra.name,
            password: password::make_password(password)?,
            is_active: extra.is_active,
            is_staff: extra.is_staff,
            is_superuser: extra.is_superuser,
            phone: extra.phone,
            leaving_date: extra.leaving_date,
        };
        let user = self.repo.insert(new).await?;
        info!(user_id = user.id, email = %user.email, "user_created");
        Ok(user)
    }

    /// Create and return a new superuser.
    #[instrument(skip(self, email, password), fields(email = %email))]
    pub async fn create_superuser(&self, email: &str, password: Option<&str>) -> Result<User, UserError> {
        let mut user = self.create_user(email, password, ExtraFields::default()).await?;
        user.is_staff = true;
        user.is_superuser = true;
        let user = self.repo.save(user).await?;
        info!(user_id = user.id, "superuser_created");
        Ok(user)
    }

    /// Replace the stored hash; `None` marks the password unusable.
    pub async fn set_password(&self, mut user: User, raw: Option<&str>) -> Result<User, UserError> {
        user.password = password::make_password(raw)?;
        self.repo.save(user).await
    }

    pub fn check_password(user: &User, raw: &str) -> bool {
        password::check_password(raw, &user.password)
    }

    /// Look a user up by login email, normalized the same way as on creation.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.repo.find_by_email(&normalize_email(email)).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<User>, UserError> {
        self.repo.find_by_id(id).await
    }

    pub async fn save(&self, user: User) -> Result<User, UserError> {
        self.repo.save(user).await
    }
}
