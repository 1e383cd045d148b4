//! Agency entity model.

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `agencies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Agency {
    pub id: DbId,
    pub name: String,
    /// IANA timezone name used to decide what "today" is for the agency.
    pub timezone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an agency.
#[derive(Debug, Clone)]
pub struct CreateAgency {
    pub name: String,
    pub timezone: String,
}
