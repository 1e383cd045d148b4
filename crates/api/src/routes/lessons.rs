//! Route definitions for the `/lessons` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::lessons;
use crate::state::AppState;

/// Routes mounted at `/lessons`.
///
/// ```text
/// POST /{id}/start      -> start
/// POST /{id}/complete   -> complete
/// POST /{id}/quiz       -> submit_quiz
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/start", post(lessons::start))
        .route("/{id}/complete", post(lessons::complete))
        .route("/{id}/quiz", post(lessons::submit_quiz))
}
