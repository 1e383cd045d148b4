//! Staff-portal user and session models.

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `staff_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StaffUser {
    pub id: DbId,
    pub agency_id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    #[serde(skip_serializing)]
    pub failed_login_count: i32,
    /// Logins are refused until this time after repeated failures.
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a staff user.
#[derive(Debug, Clone)]
pub struct CreateStaffUser {
    pub agency_id: DbId,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
}

/// A row from the `staff_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct StaffSession {
    pub id: DbId,
    pub staff_user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a staff session.
pub struct CreateStaffSession {
    pub staff_user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
