//! Password hashing and input validation.

use once_cell::sync::Lazy;
use pbkdf2::pbkdf2_hmac;
use regex::Regex;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tmt_core::{Error, Result};

pub const MIN_PASSWORD_LEN: usize = 8;

const SCHEME: &str = "pbkdf2-sha256";
const PBKDF2_ITERS: u32 = 100_000;
const KEY_LEN: usize = 32;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Hash `password` with a fresh random salt.
///
/// Output is `pbkdf2-sha256$<iterations>$<salt>$<hex key>`.
pub fn hash_password(password: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}${}${}${}",
        SCHEME,
        PBKDF2_ITERS,
        salt,
        derive(password, &salt, PBKDF2_ITERS)
    )
}

/// Check `password` against a value produced by [`hash_password`].
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(SCHEME), Some(iters), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    let Ok(iters) = iters.parse::<u32>() else {
        return false;
    };
    if iters == 0 {
        return false;
    }

    let actual = derive(password, salt, iters);
    actual.len() == expected.len() && bool::from(actual.as_bytes().ct_eq(expected.as_bytes()))
}

fn derive(password: &str, salt: &str, iters: u32) -> String {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iters, &mut key);
    hex::encode(key)
}

/// Emails compare case-insensitively and ignore surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate registration input. `email` is expected already normalized.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<()> {
    if name.trim().is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Name, email and password are required".to_string(),
        ));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(Error::Validation("Invalid email address".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}
