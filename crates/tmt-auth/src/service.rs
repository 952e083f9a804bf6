//! Auth service over the store's user and session tables.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tmt_core::{Error, Result};
use tmt_store::{Session, SqliteStore, User};
use tracing::{debug, info};

use crate::credentials::{hash_password, normalize_email, validate_registration, verify_password};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// The user fields returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Body of a successful register or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

pub struct AuthService {
    store: Arc<SqliteStore>,
    ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<SqliteStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let email = normalize_email(email);
        validate_registration(name, &email, password)?;

        if self.store.find_user_by_email(&email)?.is_some() {
            return Err(Error::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let user = self
            .store
            .insert_user(name.trim(), &email, &hash_password(password))?;
        info!("Registered user {}", user.id);

        let session = self.issue_session(&user)?;
        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            token: session.token,
            user: PublicUser::from(&user),
        })
    }

    /// Unknown email and wrong password fail with the same message.
    pub fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(Error::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .store
            .find_user_by_email(&email)?
            .filter(|user| verify_password(password, &user.password_hash))
            .ok_or_else(|| Error::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let session = self.issue_session(&user)?;
        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token: session.token,
            user: PublicUser::from(&user),
        })
    }

    /// Resolve a bearer token to its user.
    pub fn authenticate(&self, token: &str) -> Result<User> {
        let unauthorized = || Error::Unauthorized("Invalid or expired session".to_string());

        let session = self.store.find_session(token)?.ok_or_else(unauthorized)?;
        if session.is_expired(Utc::now()) {
            self.store.delete_session(token)?;
            debug!("Session for user {} expired", session.user_id);
            return Err(unauthorized());
        }

        self.store.get_user(&session.user_id)?.ok_or_else(unauthorized)
    }

    /// Revoke a session. Returns whether the token was live.
    pub fn logout(&self, token: &str) -> Result<bool> {
        self.store.delete_session(token)
    }

    fn issue_session(&self, user: &User) -> Result<Session> {
        let purged = self.store.purge_expired_sessions(Utc::now())?;
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }

        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| Error::Config(format!("session ttl: {}", e)))?;
        let session = Session {
            token: uuid::Uuid::new_v4().simple().to_string(),
            user_id: user.id.clone(),
            created_at: now,
            expires_at: now + ttl,
        };
        self.store.insert_session(&session)?;
        Ok(session)
    }
}
