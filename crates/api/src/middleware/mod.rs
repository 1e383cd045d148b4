//! Authentication and authorization extractors.
//!
//! - [`auth::OwnerUser`] -- hosted-auth JWT resolved to an agency profile.
//! - [`auth::StaffUser`] -- staff-portal session token.
//! - [`auth::Caller`] -- either of the above, dispatched on token shape.
//! - [`rbac::RequireAssignmentAdmin`] -- owner or manager profile.

pub mod auth;
pub mod rbac;
