//! Authentication — registration, login and bearer-token sessions.
//!
//! Passwords are stored as salted SHA-256 digests. Sessions are opaque
//! random tokens persisted in the store with a fixed lifetime.

pub mod credentials;
pub mod service;

pub use credentials::{hash_password, normalize_email, validate_registration, verify_password};
pub use service::{AuthResponse, AuthService, PublicUser};
