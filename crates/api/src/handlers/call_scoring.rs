//! Handler for call-scoring Q&A over a recorded call's transcript.

use agencybrain_core::error::CoreError;
use agencybrain_core::transcript::{
    extract_keywords, find_relevant_segments, parse_segments, referenced_timestamp,
    TranscriptMatch,
};
use agencybrain_core::types::DbId;
use agencybrain_db::repositories::CallRecordingRepo;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /call-scoring/calls/{id}/ask`.
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub call_id: DbId,
    pub question: String,
    pub keywords: Vec<String>,
    /// Seconds into the call, when the question names a `m:ss` moment.
    pub referenced_timestamp_secs: Option<f64>,
    pub matches: Vec<TranscriptMatch>,
}

/// POST /api/v1/call-scoring/calls/{id}/ask
///
/// Owners may ask about any call of their agency; staff only about their own.
pub async fn ask(
    State(state): State<AppState>,
    caller: Caller,
    Path(call_id): Path<DbId>,
    Json(input): Json<AskRequest>,
) -> AppResult<Json<DataResponse<AskResponse>>> {
    input.validate()?;

    let recording = CallRecordingRepo::find_by_id(&state.pool, call_id)
        .await?
        .filter(|call| call.agency_id == caller.agency_id())
        .filter(|call| match &caller {
            Caller::Owner(_) => true,
            Caller::Staff(staff) => call.staff_user_id == Some(staff.staff_user_id),
        })
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Call recording",
            id: call_id,
        }))?;

    let segments = parse_segments(&recording.transcript_segments)?;
    let matches = find_relevant_segments(&segments, &input.question)?;

    tracing::debug!(
        call_id,
        segments = segments.len(),
        matches = matches.len(),
        "Answered call-scoring question"
    );

    Ok(Json(DataResponse {
        data: AskResponse {
            call_id,
            keywords: extract_keywords(&input.question),
            referenced_timestamp_secs: referenced_timestamp(&input.question),
            question: input.question,
            matches,
        },
    }))
}
