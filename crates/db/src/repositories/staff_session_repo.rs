//! Repository for the `staff_sessions` table.

use agencybrain_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::staff::{CreateStaffSession, StaffSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, staff_user_id, token_hash, expires_at, is_revoked, created_at, updated_at";

/// Provides CRUD operations for staff-portal sessions.
pub struct StaffSessionRepo;

impl StaffSessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateStaffSession,
    ) -> Result<StaffSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_sessions (staff_user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffSession>(&query)
            .bind(input.staff_user_id)
            .bind(&input.token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a live session by its token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_active_by_token_hash(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<StaffSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM staff_sessions
             WHERE token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, StaffSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE staff_sessions SET is_revoked = true WHERE id = $1 AND is_revoked = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete sessions that expired before `cutoff` or were revoked.
    pub async fn cleanup_expired(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM staff_sessions WHERE expires_at < $1 OR is_revoked = true")
                .bind(cutoff)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
