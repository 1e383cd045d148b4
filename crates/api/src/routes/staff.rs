//! Route definitions for the `/staff` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::staff_auth;
use crate::state::AppState;

/// Routes mounted at `/staff`.
///
/// ```text
/// POST /login    -> login
/// POST /logout   -> logout (requires staff session)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(staff_auth::login))
        .route("/logout", post(staff_auth::logout))
}
