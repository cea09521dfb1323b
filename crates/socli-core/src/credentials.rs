//! Password hashing and email validation.
//!
//! Passwords are hashed with SHA-256 before they leave the client; the store
//! only ever sees the lowercase hex digest.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@]+@[^@]+\.[^@]+$").expect("email pattern is valid"));

/// Hex-encoded SHA-256 digest of a password.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep digests out of logs and debug output.
impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Hash a cleartext password.
pub fn hash_password(password: &str) -> PasswordHash {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    PasswordHash(format!("{:x}", hasher.finalize()))
}

/// Check email syntax: something, `@`, something, `.`, something.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
