use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use tracing::{debug, info, instrument, warn};

use crate::users::{password, User, UserManager};

use super::domain::{AuthSession, Claims, Credentials};
use super::errors::AuthError;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    users: UserManager,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(users: UserManager, cfg: AuthConfig) -> Self { Self { users, cfg } }

    pub fn users(&self) -> &UserManager { &self.users }

    /// Authenticate a user by email and password and issue a token.
    /// Unknown emails, wrong passwords and inactive accounts all fail with
    /// `InvalidCredentials`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{service::{AuthService, AuthConfig}, domain::Credentials};
    /// use service::users::{ExtraFields, UserManager, repository::mock::MockUserRepository};
    /// let users = UserManager::new(Arc::new(MockUserRepository::default()));
    /// let svc = AuthService::new(users.clone(), AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 1 });
    /// tokio_test::block_on(users.create_user("u@e.com", Some("Passw0rd"), ExtraFields::default())).unwrap();
    /// let session = tokio_test::block_on(svc.login(Credentials::new("u@e.com", "Passw0rd"))).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(!session.token.is_empty());
    /// ```
    #[instrument(skip(self, creds), fields(email = %creds.email))]
    pub async fn login(&self, creds: Credentials) -> Result<AuthSession, AuthError> {
        let Some(user) = self.users.get_by_email(&creds.email).await? else {
            password::check_password_unknown_user(&creds.password);
            debug!("no account for email");
            return Err(AuthError::InvalidCredentials);
        };

        if !UserManager::check_password(&user, &creds.password) {
            debug!(user_id = user.id, "password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        let mut user = user;
        user.last_login = Some(Utc::now().into());
        let user = self.users.save(user).await?;

        let token = self.issue_token(&user)?;
        info!(user_id = user.id, "token_issued");
        Ok(AuthSession { user, token })
    }

    /// Sign an HS256 token for `user` valid for the configured TTL.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = TimeDelta::try_hours(self.cfg.token_ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AuthError::TokenError(format!("token ttl of {} hours is out of range", self.cfg.token_ttl_hours)))?;
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Resolve a bearer token to an active user.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        let key = DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        let data = decode::<Claims>(token, &key, &validation).map_err(|e| {
            warn!(err = %e, "token validation failed");
            AuthError::InvalidToken
        })?;
        let id: i32 = data.claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        let user = self.users.get(id).await?.ok_or(AuthError::InvalidToken)?;
        if !user.is_active {
            return Err(AuthError::Inactive);
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::users::{repository::mock::MockUserRepository, ExtraFields};

    fn service() -> AuthService {
        let users = UserManager::new(Arc::new(MockUserRepository::default()));
        AuthService::new(users, AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 })
    }

    fn login(email: &str, password: &str) -> Credentials {
        Credentials::new(email, password)
    }

    #[tokio::test]
    async fn login_issues_token_that_authenticates() {
        let svc = service();
        svc.users().create_user("user@example.com", Some("testpass123"), ExtraFields::default()).await.unwrap();
        let session = svc.login(login("user@EXAMPLE.com", "testpass123")).await.unwrap();
        assert!(session.user.last_login.is_some());
        let user = svc.authenticate(&session.token).await.unwrap();
        assert_eq!(user.id, session.user.id);
    }

    #[tokio::test]
    async fn wrong_password_rejected() {
        let svc = service();
        svc.users().create_user("user@example.com", Some("testpass123"), ExtraFields::default()).await.unwrap();
        let res = svc.login(login("user@example.com", "nope")).await;
        assert!(matches!(res, Err(AuthError::InvalidCredentials)));
        let res = svc.login(login("ghost@example.com", "testpass123")).await;
        assert!(matches!(res, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn user_without_password_cannot_login() {
        let svc = service();
        svc.users().create_user("nopass@example.com", None, ExtraFields::default()).await.unwrap();
        let res = svc.login(login("nopass@example.com", "")).await;
        assert!(matches!(res, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn inactive_user_token_rejected() {
        let svc = service();
        let user = svc.users().create_user("gone@example.com", Some("pw"), ExtraFields::default()).await.unwrap();
        let token = svc.issue_token(&user).unwrap();
        let mut user = user;
        user.is_active = false;
        svc.users().save(user).await.unwrap();
        assert!(matches!(svc.authenticate(&token).await, Err(AuthError::Inactive)));
        assert!(matches!(svc.login(login("gone@example.com", "pw")).await, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn garbage_and_foreign_tokens_rejected() {
        let svc = service();
        let user = svc.users().create_user("u@example.com", Some("pw"), ExtraFields::default()).await.unwrap();
        assert!(matches!(svc.authenticate("not-a-jwt").await, Err(AuthError::InvalidToken)));
        assert!(matches!(svc.authenticate("").await, Err(AuthError::MissingCredentials)));

        let other = AuthService::new(svc.users().clone(), AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 });
        let foreign = other.issue_token(&user).unwrap();
        assert!(matches!(svc.authenticate(&foreign).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_rejected() {
        let svc = service();
        let user = svc.users().create_user("old@example.com", Some("pw"), ExtraFields::default()).await.unwrap();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims { sub: user.id.to_string(), email: user.email.clone(), iat: now - 7200, exp: now - 3600 };
        let token = encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(b"test-secret")).unwrap();
        assert!(matches!(svc.authenticate(&token).await, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn out_of_range_ttl_is_an_error_not_a_panic() {
        let users = UserManager::new(Arc::new(MockUserRepository::default()));
        let svc = AuthService::new(users, AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1_000_000_000_000 });
        let user = svc.users().create_user("far@example.com", Some("pw"), ExtraFields::default()).await.unwrap();
        assert!(matches!(svc.issue_token(&user), Err(AuthError::TokenError(_))));
        assert!(matches!(svc.login(login("far@example.com", "pw")).await, Err(AuthError::TokenError(_))));
    }
}
