//! Route definitions for the `/assignments` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// POST /                  -> create
/// PUT  /{id}/start-date   -> update_start_date
/// POST /{id}/activate     -> activate
/// POST /{id}/complete     -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assignments::create))
        .route("/{id}/start-date", put(assignments::update_start_date))
        .route("/{id}/activate", post(assignments::activate))
        .route("/{id}/complete", post(assignments::complete))
}
