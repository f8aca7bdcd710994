//! Public sign-up: field checks on the raw input, then creation through the
//! manager with a duplicate email reported against the `email` field.

use serde::Deserialize;
use tracing::warn;

use models::user::{validate_email, EMAIL_MAX_LEN, NAME_MAX_LEN};

use crate::errors::ServiceError;
use crate::validation::ValidationErrors;

use super::{ExtraFields, User, UserError, UserManager};

pub const PASSWORD_MIN_LEN: usize = 5;
pub const EMAIL_TAKEN: &str = "user with this email already exists.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Trimmed, checked registration fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub(crate) fn required(errors: &mut ValidationErrors, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None => { errors.add(field, "This field is required."); None }
        Some("") => { errors.add(field, "This field may not be blank."); None }
        Some(v) => Some(v.to_string()),
    }
}

impl RegisterInput {
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = required(&mut errors, "email", self.email.as_deref());
        let password = required(&mut errors, "password", self.password.as_deref());
        let name = required(&mut errors, "name", self.name.as_deref());

        if let Some(e) = &email {
            if e.chars().count() > EMAIL_MAX_LEN {
                errors.add("email", format!("Ensure this field has no more than {EMAIL_MAX_LEN} characters."));
            } else if validate_email(e).is_err() {
                errors.add("email", "Enter a valid email address.");
            }
        }
        if let Some(p) = &password {
            if p.chars().count() < PASSWORD_MIN_LEN {
                errors.add("password", format!("Ensure this field has at least {PASSWORD_MIN_LEN} characters."));
            }
        }
        if let Some(n) = &name {
            if n.chars().count() > NAME_MAX_LEN {
                errors.add("name", format!("Ensure this field has no more than {NAME_MAX_LEN} characters."));
            }
        }

        match (email, password, name) {
            (Some(email), Some(password), Some(name)) if errors.is_empty() => Ok(Registration { email, password, name }),
            _ => Err(errors),
        }
    }
}

impl UserManager {
    /// Validate and create a regular user.
    pub async fn register(&self, input: &RegisterInput) -> Result<User, ServiceError> {
        let reg = input.validate()?;
        let taken = || ServiceError::Validation(ValidationErrors::single("email", EMAIL_TAKEN));
        if self.get_by_email(&reg.email).await.map_err(|e| ServiceError::Db(e.to_string()))?.is_some() {
            return Err(taken());
        }
        match self.create_user(&reg.email, Some(&reg.password), ExtraFields::named(reg.name)).await {
            Ok(user) => Ok(user),
            Err(UserError::Conflict) => Err(taken()),
            Err(UserError::MissingEmail) => Err(ValidationErrors::single("email", "This field is required.").into()),
            Err(e) => {
                warn!(err = %e, "register failed");
                Err(ServiceError::Db(e.to_string()))
            }
        }
    }
}
