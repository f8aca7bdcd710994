use serde::{Deserialize, Serialize};

use crate::users::{registration::required, User};
use crate::validation::ValidationErrors;

/// Token request body. Fields are optional so a missing key and a blank
/// value produce different messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated login pair.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl LoginInput {
    /// Both fields must be present and non-blank. The password is taken as
    /// sent, without trimming.
    pub fn validate(&self) -> Result<Credentials, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = required(&mut errors, "email", self.email.as_deref());
        let password = match self.password.as_deref() {
            None => { errors.add("password", "This field is required."); None }
            Some("") => { errors.add("password", "This field may not be blank."); None }
            Some(p) => Some(p.to_string()),
        };
        errors.into_result(())?;
        Ok(Credentials { email: email.unwrap_or_default(), password: password.unwrap_or_default() })
    }
}

/// JWT claims; `sub` carries the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Login result (session)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> LoginInput {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn missing_fields_are_required() {
        let errs = parse("{}").validate().unwrap_err();
        assert_eq!(errs.field("email"), Some(&["This field is required.".to_string()][..]));
        assert_eq!(errs.field("password"), Some(&["This field is required.".to_string()][..]));
    }

    #[test]
    fn blank_fields_may_not_be_blank() {
        let errs = parse(r#"{"email": "  ", "password": ""}"#).validate().unwrap_err();
        assert_eq!(errs.field("email"), Some(&["This field may not be blank.".to_string()][..]));
        assert_eq!(errs.field("password"), Some(&["This field may not be blank.".to_string()][..]));
    }

    #[test]
    fn valid_input_keeps_password_verbatim() {
        let creds = parse(r#"{"email": " u@example.com ", "password": " pw "}"#).validate().unwrap();
        assert_eq!(creds.email, "u@example.com");
        assert_eq!(creds.password, " pw ");
    }
}
