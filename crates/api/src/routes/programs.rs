//! Route definitions for the program views.

use axum::routing::get;
use axum::Router;

use crate::handlers::{challenge, sales_experience};
use crate::state::AppState;

/// Program view routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /sales-experience         -> owner_overview
/// GET /sales-experience/staff   -> staff_overview
/// GET /challenge                -> overview
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sales-experience", get(sales_experience::owner_overview))
        .route("/sales-experience/staff", get(sales_experience::staff_overview))
        .route("/challenge", get(challenge::overview))
}
