//! Bearer-token extractors for the two caller kinds.

use agencybrain_core::error::CoreError;
use agencybrain_core::roles::{LEARNER_OWNER, LEARNER_STAFF};
use agencybrain_core::types::DbId;
use agencybrain_db::repositories::{ProfileRepo, StaffRepo, StaffSessionRepo};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt::validate_token;
use crate::auth::staff_token::{classify_bearer, hash_session_token, BearerKind};
use crate::error::AppError;
use crate::state::AppState;

/// Agency owner or manager authenticated with a hosted-auth JWT.
///
/// ```ignore
/// async fn my_handler(owner: OwnerUser) -> AppResult<Json<()>> {
///     tracing::info!(profile_id = owner.profile_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct OwnerUser {
    pub profile_id: DbId,
    pub auth_user_id: Uuid,
    pub agency_id: DbId,
    /// Agency role from the profile (`owner` or `manager`).
    pub role: String,
}

/// Staff-portal user authenticated with an opaque session token.
#[derive(Debug, Clone)]
pub struct StaffUser {
    pub staff_user_id: DbId,
    pub agency_id: DbId,
    pub session_id: DbId,
    pub display_name: String,
}

/// Any authenticated learner.
#[derive(Debug, Clone)]
pub enum Caller {
    Owner(OwnerUser),
    Staff(StaffUser),
}

impl Caller {
    pub fn agency_id(&self) -> DbId {
        match self {
            Caller::Owner(owner) => owner.agency_id,
            Caller::Staff(staff) => staff.agency_id,
        }
    }

    /// `learner_kind` stored on progress rows.
    pub fn learner_kind(&self) -> &'static str {
        match self {
            Caller::Owner(_) => LEARNER_OWNER,
            Caller::Staff(_) => LEARNER_STAFF,
        }
    }

    /// `learner_id` stored on progress rows.
    pub fn learner_id(&self) -> DbId {
        match self {
            Caller::Owner(owner) => owner.profile_id,
            Caller::Staff(staff) => staff.staff_user_id,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Caller::Staff(_))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })
}

async fn resolve_owner(token: &str, state: &AppState) -> Result<OwnerUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Hosted-auth token rejected");
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    let profile = ProfileRepo::find_by_auth_user_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Forbidden(
                "No agency profile for this account".into(),
            ))
        })?;

    Ok(OwnerUser {
        profile_id: profile.id,
        auth_user_id: profile.auth_user_id,
        agency_id: profile.agency_id,
        role: profile.role,
    })
}

async fn resolve_staff(token: &str, state: &AppState) -> Result<StaffUser, AppError> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid or expired session".into()));

    let token_hash = hash_session_token(token);
    let session = StaffSessionRepo::find_active_by_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    let staff = StaffRepo::find_by_id(&state.pool, session.staff_user_id)
        .await?
        .ok_or_else(invalid)?;

    if !staff.is_active {
        return Err(invalid());
    }

    Ok(StaffUser {
        staff_user_id: staff.id,
        agency_id: staff.agency_id,
        session_id: session.id,
        display_name: staff.display_name,
    })
}

impl FromRequestParts<AppState> for OwnerUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        match classify_bearer(token) {
            BearerKind::HostedJwt => resolve_owner(token, state).await,
            BearerKind::StaffSession => Err(AppError::Core(CoreError::Forbidden(
                "This endpoint requires an agency owner account".into(),
            ))),
        }
    }
}

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        match classify_bearer(token) {
            BearerKind::StaffSession => resolve_staff(token, state).await,
            BearerKind::HostedJwt => Err(AppError::Core(CoreError::Forbidden(
                "This endpoint requires a staff portal session".into(),
            ))),
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        match classify_bearer(token) {
            BearerKind::HostedJwt => resolve_owner(token, state).await.map(Caller::Owner),
            BearerKind::StaffSession => resolve_staff(token, state).await.map(Caller::Staff),
        }
    }
}
