//! Handlers for the 8-week Sales Experience program views.

use agencybrain_core::curriculum::parse_date;
use agencybrain_core::program::ProgramKind;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::program::{build_overview, ProgramOverview};
use crate::middleware::auth::{Caller, OwnerUser, StaffUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the owner view.
#[derive(Debug, Deserialize)]
pub struct PreviewParams {
    /// Evaluate the schedule on this date (`YYYY-MM-DD`) instead of today.
    pub as_of: Option<String>,
}

/// GET /api/v1/sales-experience
///
/// Owner view of the agency's Sales Experience assignment.
pub async fn owner_overview(
    State(state): State<AppState>,
    owner: OwnerUser,
    Query(params): Query<PreviewParams>,
) -> AppResult<Json<DataResponse<ProgramOverview>>> {
    let as_of = params
        .as_of
        .as_deref()
        .map(|v| parse_date(v, "as_of"))
        .transpose()?;

    let overview = build_overview(
        &state.pool,
        &Caller::Owner(owner),
        ProgramKind::SalesExperience,
        as_of,
    )
    .await?;
    Ok(Json(DataResponse { data: overview }))
}

/// GET /api/v1/sales-experience/staff
///
/// Staff view: only `staff_visible` lessons, same schedule fields.
pub async fn staff_overview(
    State(state): State<AppState>,
    staff: StaffUser,
) -> AppResult<Json<DataResponse<ProgramOverview>>> {
    let overview = build_overview(
        &state.pool,
        &Caller::Staff(staff),
        ProgramKind::SalesExperience,
        None,
    )
    .await?;
    Ok(Json(DataResponse { data: overview }))
}
