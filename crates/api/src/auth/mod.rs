//! Authentication primitives for the two kinds of callers.
//!
//! - [`jwt`] -- hosted-auth JWT validation (agency owners and managers).
//! - [`staff_token`] -- opaque staff-portal session tokens and bearer dispatch.
//! - [`password`] -- Argon2id hashing for staff-portal passwords.

pub mod jwt;
pub mod password;
pub mod staff_token;
