//! Handler for the 6-week Challenge program view.

use agencybrain_core::program::ProgramKind;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::program::{build_overview, ProgramOverview};
use crate::middleware::auth::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/challenge
pub async fn overview(
    State(state): State<AppState>,
    caller: Caller,
) -> AppResult<Json<DataResponse<ProgramOverview>>> {
    let overview = build_overview(&state.pool, &caller, ProgramKind::Challenge, None).await?;
    Ok(Json(DataResponse { data: overview }))
}
