//! Handlers for staff-portal login and logout.

use agencybrain_core::error::CoreError;
use agencybrain_core::types::{DbId, Timestamp};
use agencybrain_db::models::staff::CreateStaffSession;
use agencybrain_db::repositories::{StaffRepo, StaffSessionRepo};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::password::verify_password;
use crate::auth::staff_token::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::StaffUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Consecutive failed logins before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Minutes a locked account refuses logins.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /staff/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct StaffLoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Successful staff login.
#[derive(Debug, Serialize)]
pub struct StaffLoginResponse {
    /// Opaque bearer token; shown once.
    pub token: String,
    pub expires_at: Timestamp,
    pub staff_user: StaffUserInfo,
}

#[derive(Debug, Serialize)]
pub struct StaffUserInfo {
    pub id: DbId,
    pub agency_id: DbId,
    pub username: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/staff/login
///
/// After [`MAX_FAILED_ATTEMPTS`] consecutive wrong passwords the account is
/// locked for [`LOCK_DURATION_MINS`] minutes; a successful login resets the
/// counter.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<StaffLoginRequest>,
) -> AppResult<Json<DataResponse<StaffLoginResponse>>> {
    input.validate()?;

    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = StaffRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    if user.locked_until.is_some_and(|until| until > Utc::now()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        let failures = StaffRepo::increment_failed_login(&state.pool, user.id).await?;
        if failures >= MAX_FAILED_ATTEMPTS {
            let lock_until = Utc::now() + chrono::Duration::minutes(LOCK_DURATION_MINS);
            StaffRepo::lock_account(&state.pool, user.id, lock_until).await?;
            tracing::warn!(staff_user_id = user.id, failures, "Staff account locked");
        } else {
            tracing::info!(staff_user_id = user.id, failures, "Staff login rejected");
        }
        return Err(invalid());
    }

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.staff_session_ttl_hours);

    StaffSessionRepo::create(
        &state.pool,
        &CreateStaffSession {
            staff_user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;
    StaffRepo::record_successful_login(&state.pool, user.id).await?;

    tracing::info!(staff_user_id = user.id, agency_id = user.agency_id, "Staff login");

    Ok(Json(DataResponse {
        data: StaffLoginResponse {
            token,
            expires_at,
            staff_user: StaffUserInfo {
                id: user.id,
                agency_id: user.agency_id,
                username: user.username,
                display_name: user.display_name,
            },
        },
    }))
}

/// POST /api/v1/staff/logout
///
/// Revoke the current session. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, staff: StaffUser) -> AppResult<StatusCode> {
    StaffSessionRepo::revoke(&state.pool, staff.session_id).await?;
    tracing::info!(staff_user_id = staff.staff_user_id, "Staff logout");
    Ok(StatusCode::NO_CONTENT)
}
