//! Hosted-auth profile model (agency owners and managers).

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    /// The hosted-auth user id (JWT `sub`).
    pub auth_user_id: Uuid,
    pub agency_id: DbId,
    pub full_name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a profile.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub auth_user_id: Uuid,
    pub agency_id: DbId,
    pub full_name: String,
    pub role: String,
}
