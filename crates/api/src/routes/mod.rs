pub mod assignments;
pub mod call_scoring;
pub mod health;
pub mod lessons;
pub mod programs;
pub mod staff;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /staff/login                           staff login (public)
/// /staff/logout                          revoke session (staff)
///
/// /sales-experience                      owner view, ?as_of= preview (owner)
/// /sales-experience/staff                staff view (staff)
/// /challenge                             challenge view (owner or staff)
///
/// /lessons/{id}/start                    start lesson (POST)
/// /lessons/{id}/complete                 complete lesson (POST)
/// /lessons/{id}/quiz                     submit quiz (POST)
///
/// /assignments                           create (owner/manager)
/// /assignments/{id}/start-date           change start date (PUT)
/// /assignments/{id}/activate             pending -> active (POST)
/// /assignments/{id}/complete             active -> completed (POST)
///
/// /call-scoring/calls/{id}/ask           transcript Q&A (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/staff", staff::router())
        .merge(programs::router())
        .nest("/lessons", lessons::router())
        .nest("/assignments", assignments::router())
        .nest("/call-scoring", call_scoring::router())
}
