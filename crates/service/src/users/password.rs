//! Argon2 password hashing. A missing password is stored as an unusable
//! marker (`!` + random suffix) that never verifies.

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};

use super::errors::UserError;

pub const UNUSABLE_PASSWORD_PREFIX: char = '!';
const UNUSABLE_SUFFIX_LEN: usize = 40;

/// Stand-in hash verified when no account matches a login email.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| make_password(Some("not-a-real-account")).ok());

/// Hash `raw`, or build an unusable marker when `raw` is `None`.
pub fn make_password(raw: Option<&str>) -> Result<String, UserError> {
    let Some(raw) = raw else {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(UNUSABLE_SUFFIX_LEN)
            .map(char::from)
            .collect();
        return Ok(format!("{UNUSABLE_PASSWORD_PREFIX}{suffix}"));
    };
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| UserError::HashError(e.to_string()))?
        .to_string();
    Ok(hash)
}

pub fn is_password_usable(encoded: &str) -> bool {
    !encoded.is_empty() && !encoded.starts_with(UNUSABLE_PASSWORD_PREFIX)
}

pub fn check_password(raw: &str, encoded: &str) -> bool {
    if !is_password_usable(encoded) {
        return false;
    }
    match PasswordHash::new(encoded) {
        Ok(parsed) => Argon2::default().verify_password(raw.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Run a full argon2 verification that never succeeds. Used by login when no
/// account matches the email.
pub fn check_password_unknown_user(raw: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = check_password(raw, hash);
    }
    false
}
