use async_trait::async_trait;

use models::user::NewUser;

use super::errors::UserError;
use super::User;

/// Repository abstraction for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new: NewUser) -> Result<User, UserError>;
    /// Persist every column of an existing user.
    async fn save(&self, user: User) -> Result<User, UserError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<BTreeMap<i32, User>>, // key: id
    }

    impl MockUserRepository {
        fn next_id(users: &BTreeMap<i32, User>) -> i32 {
            users.keys().next_back().copied().unwrap_or(0) + 1
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn insert(&self, new: NewUser) -> Result<User, UserError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == new.email) {
                return Err(UserError::Conflict);
            }
            let user = User {
                id: Self::next_id(&users),
                email: new.email,
                name: new.name,
                password: new.password,
                is_active: new.is_active,
                is_staff: new.is_staff,
                is_superuser: new.is_superuser,
                phone: new.phone,
                leaving_date: new.leaving_date,
                last_login: None,
            };
            users.insert(user.id, user.clone());
            Ok(user)
        }

        async fn save(&self, user: User) -> Result<User, UserError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == user.email && u.id != user.id) {
                return Err(UserError::Conflict);
            }
            match users.get_mut(&user.id) {
                Some(slot) => { *slot = user.clone(); Ok(user) }
                None => Err(UserError::NotFound),
            }
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
            Ok(self.users.lock().unwrap().values().find(|u| u.email == email).cloned())
        }
    }
}
