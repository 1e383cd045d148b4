//! Periodic purge of dead staff-portal sessions.
//!
//! Deletes revoked sessions and sessions that expired more than a grace
//! period ago. Runs on a fixed interval using `tokio::time::interval`.

use std::time::Duration;

use agencybrain_db::repositories::StaffSessionRepo;
use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Expired sessions are kept this long before being purged.
const GRACE_PERIOD_HOURS: i64 = 24;

/// How often the cleanup job runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

/// Run the session cleanup loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        grace_period_hours = GRACE_PERIOD_HOURS,
        interval_secs = CLEANUP_INTERVAL.as_secs(),
        "Staff session cleanup started"
    );

    let mut interval = tokio::time::interval(CLEANUP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Staff session cleanup stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::hours(GRACE_PERIOD_HOURS);
                match StaffSessionRepo::cleanup_expired(&pool, cutoff).await {
                    Ok(0) => tracing::debug!("Staff session cleanup: nothing to purge"),
                    Ok(deleted) => tracing::info!(deleted, "Staff session cleanup: purged sessions"),
                    Err(e) => tracing::error!(error = %e, "Staff session cleanup failed"),
                }
            }
        }
    }
}
