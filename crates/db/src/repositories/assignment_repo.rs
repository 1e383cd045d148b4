//! Repository for the `program_assignments` table.

use agencybrain_core::status::AssignmentStatus;
use agencybrain_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::assignment::{Assignment, CreateAssignment};

const COLUMNS: &str = "id, agency_id, program, start_date, status_id, created_at, updated_at";

/// Provides CRUD operations for program assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// Insert a new `pending` assignment.
    ///
    /// Fails with a `uq_program_assignments_open` violation if the agency
    /// already has an open assignment for the program.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_assignments (agency_id, program, start_date, status_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.agency_id)
            .bind(&input.program)
            .bind(input.start_date)
            .bind(AssignmentStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM program_assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The assignment an agency currently works through for `program`.
    ///
    /// Prefers the open (pending or active) assignment; falls back to the
    /// most recently completed one.
    pub async fn find_current_for_agency(
        pool: &PgPool,
        agency_id: DbId,
        program: &str,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM program_assignments
             WHERE agency_id = $1 AND program = $2
             ORDER BY (status_id = $3) ASC, created_at DESC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(agency_id)
            .bind(program)
            .bind(AssignmentStatus::Completed.id())
            .fetch_optional(pool)
            .await
    }

    /// Change the start date of a pending assignment.
    ///
    /// Returns `None` when the assignment does not exist or is no longer
    /// pending; the start date is frozen once the program begins.
    pub async fn update_start_date(
        pool: &PgPool,
        id: DbId,
        start_date: NaiveDate,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE program_assignments SET start_date = $2
             WHERE id = $1 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(start_date)
            .bind(AssignmentStatus::Pending.id())
            .fetch_optional(pool)
            .await
    }

    /// Move an assignment from `from` to `to`.
    ///
    /// Compare-and-set on the current status; returns `None` if the row is
    /// missing or its status changed concurrently.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: AssignmentStatus,
        to: AssignmentStatus,
    ) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!(
            "UPDATE program_assignments SET status_id = $3
             WHERE id = $1 AND status_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .bind(from.id())
            .bind(to.id())
            .fetch_optional(pool)
            .await
    }
}
