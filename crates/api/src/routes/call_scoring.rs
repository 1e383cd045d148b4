//! Route definitions for the `/call-scoring` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::call_scoring;
use crate::state::AppState;

/// Routes mounted at `/call-scoring`.
///
/// ```text
/// POST /calls/{id}/ask   -> ask
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/calls/{id}/ask", post(call_scoring::ask))
}
