//! Staff-portal session tokens and bearer-token dispatch.
//!
//! Staff tokens are opaque random strings; only their SHA-256 hex digest is
//! persisted. A bearer token that has the shape of a JWT (three non-empty
//! dot-separated segments) belongs to the hosted-auth provider; anything
//! else is treated as a staff session token.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Which authentication path a bearer token takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerKind {
    HostedJwt,
    StaffSession,
}

/// Classify a bearer token by its shape.
pub fn classify_bearer(token: &str) -> BearerKind {
    let mut segments = 0;
    for part in token.split('.') {
        if part.is_empty() {
            return BearerKind::StaffSession;
        }
        segments += 1;
    }
    if segments == 3 {
        BearerKind::HostedJwt
    } else {
        BearerKind::StaffSession
    }
}

/// Generate a new staff session token.
///
/// Returns `(plaintext, sha256_hex_hash)`. The plaintext goes to the client
/// once; only the hash is stored.
pub fn generate_session_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a staff session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
