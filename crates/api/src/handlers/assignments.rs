//! Handlers for program assignments (owner/manager only).
//!
//! An assignment starts `pending`; its start date may change freely until it
//! is activated, after which the date is frozen.

use agencybrain_core::curriculum::{parse_start_date, require_start_date};
use agencybrain_core::error::CoreError;
use agencybrain_core::program::ProgramKind;
use agencybrain_core::status::AssignmentStatus;
use agencybrain_core::types::DbId;
use agencybrain_db::models::assignment::{Assignment, CreateAssignment};
use agencybrain_db::repositories::AssignmentRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::OwnerUser;
use crate::middleware::rbac::RequireAssignmentAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /assignments`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    #[validate(length(min = 1, max = 50))]
    pub program: String,
    /// Optional `YYYY-MM-DD` start date.
    pub start_date: Option<String>,
}

/// Request body for `PUT /assignments/{id}/start-date`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStartDateRequest {
    #[validate(length(min = 1, max = 10))]
    pub start_date: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/assignments
///
/// Create a pending assignment for the caller's agency. A second open
/// assignment for the same program violates `uq_program_assignments_open`
/// and maps to 409.
pub async fn create(
    State(state): State<AppState>,
    RequireAssignmentAdmin(owner): RequireAssignmentAdmin,
    Json(input): Json<CreateAssignmentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Assignment>>)> {
    input.validate()?;
    let program = ProgramKind::parse(&input.program)?;
    let start_date = input
        .start_date
        .as_deref()
        .map(parse_start_date)
        .transpose()?;

    let assignment = AssignmentRepo::create(
        &state.pool,
        &CreateAssignment {
            agency_id: owner.agency_id,
            program: program.as_str().to_string(),
            start_date,
        },
    )
    .await?;

    tracing::info!(
        assignment_id = assignment.id,
        agency_id = owner.agency_id,
        %program,
        "Assignment created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assignment })))
}

/// PUT /api/v1/assignments/{id}/start-date
///
/// Returns 409 once the assignment has left `pending`.
pub async fn update_start_date(
    State(state): State<AppState>,
    RequireAssignmentAdmin(owner): RequireAssignmentAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStartDateRequest>,
) -> AppResult<Json<DataResponse<Assignment>>> {
    input.validate()?;
    let start_date = parse_start_date(&input.start_date)?;

    let existing = find_owned(&state.pool, &owner, id).await?;
    let status = existing.status()?;
    if !status.start_date_is_mutable() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Start date cannot change once the assignment is {}",
            status.name()
        ))));
    }

    let updated = AssignmentRepo::update_start_date(&state.pool, id, start_date)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Assignment is no longer pending".into(),
            ))
        })?;

    tracing::info!(assignment_id = id, %start_date, "Assignment start date updated");
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/assignments/{id}/activate
///
/// `pending -> active`. Requires a start date.
pub async fn activate(
    State(state): State<AppState>,
    RequireAssignmentAdmin(owner): RequireAssignmentAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Assignment>>> {
    let existing = find_owned(&state.pool, &owner, id).await?;
    existing
        .status()?
        .validate_transition(AssignmentStatus::Active)?;
    require_start_date(existing.start_date)?;

    let updated = transition(&state.pool, id, AssignmentStatus::Pending, AssignmentStatus::Active)
        .await?;
    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/assignments/{id}/complete
///
/// `active -> completed`. Every lesson stays unlocked afterwards.
pub async fn complete(
    State(state): State<AppState>,
    RequireAssignmentAdmin(owner): RequireAssignmentAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Assignment>>> {
    let existing = find_owned(&state.pool, &owner, id).await?;
    existing
        .status()?
        .validate_transition(AssignmentStatus::Completed)?;

    let updated = transition(
        &state.pool,
        id,
        AssignmentStatus::Active,
        AssignmentStatus::Completed,
    )
    .await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an assignment belonging to the caller's agency. Other agencies'
/// assignments resolve as not found.
async fn find_owned(pool: &PgPool, owner: &OwnerUser, id: DbId) -> AppResult<Assignment> {
    AssignmentRepo::find_by_id(pool, id)
        .await?
        .filter(|a| a.agency_id == owner.agency_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assignment",
            id,
        }))
}

async fn transition(
    pool: &PgPool,
    id: DbId,
    from: AssignmentStatus,
    to: AssignmentStatus,
) -> AppResult<Assignment> {
    let updated = AssignmentRepo::transition(pool, id, from, to)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Assignment is no longer {}",
                from.name()
            )))
        })?;

    tracing::info!(
        assignment_id = id,
        from = from.name(),
        to = to.name(),
        "Assignment status changed"
    );
    Ok(updated)
}
