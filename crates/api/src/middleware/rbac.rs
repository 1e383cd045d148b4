//! Role-based access control extractors.
//!
//! Each extractor wraps an authenticated caller and rejects requests whose
//! agency role does not meet the requirement.

use agencybrain_core::error::CoreError;
use agencybrain_core::roles::can_manage_assignments;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::OwnerUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an `owner` or `manager` profile. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn create(RequireAssignmentAdmin(owner): RequireAssignmentAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAssignmentAdmin(pub OwnerUser);

impl FromRequestParts<AppState> for RequireAssignmentAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let owner = OwnerUser::from_request_parts(parts, state).await?;
        if !can_manage_assignments(&owner.role) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Owner or manager role required".into(),
            )));
        }
        Ok(RequireAssignmentAdmin(owner))
    }
}
