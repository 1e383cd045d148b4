//! Program assignment model.

use agencybrain_core::error::CoreError;
use agencybrain_core::program::ProgramKind;
use agencybrain_core::status::{AssignmentStatus, StatusId};
use agencybrain_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `program_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub agency_id: DbId,
    pub program: String,
    pub start_date: Option<NaiveDate>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Assignment {
    pub fn status(&self) -> Result<AssignmentStatus, CoreError> {
        AssignmentStatus::from_id(self.status_id)
    }

    pub fn program_kind(&self) -> Result<ProgramKind, CoreError> {
        ProgramKind::parse(&self.program)
    }
}

/// DTO for creating an assignment. New assignments are always `pending`.
#[derive(Debug, Clone)]
pub struct CreateAssignment {
    pub agency_id: DbId,
    pub program: String,
    pub start_date: Option<NaiveDate>,
}
