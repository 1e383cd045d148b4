//! Repository for the `staff_users` table.

use agencybrain_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::staff::{CreateStaffUser, StaffUser};

const COLUMNS: &str = "id, agency_id, username, password_hash, display_name, is_active, \
                        last_login_at, failed_login_count, locked_until, created_at, updated_at";

/// Provides CRUD operations for staff-portal users.
pub struct StaffRepo;

impl StaffRepo {
    pub async fn create(pool: &PgPool, input: &CreateStaffUser) -> Result<StaffUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff_users (agency_id, username, password_hash, display_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(input.agency_id)
            .bind(&input.username)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE id = $1");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a staff user by username (case-insensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<StaffUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff_users WHERE lower(username) = lower($1)");
        sqlx::query_as::<_, StaffUser>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter and return the new count.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<i32, sqlx::Error> {
        let (count,): (i32,) = sqlx::query_as(
            "UPDATE staff_users SET failed_login_count = failed_login_count + 1
             WHERE id = $1
             RETURNING failed_login_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Refuse logins for this staff user until `until`.
    pub async fn lock_account(pool: &PgPool, id: DbId, until: Timestamp) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE staff_users SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset the failure counter, clear any lock,
    /// and stamp `last_login_at`.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE staff_users SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Deactivate a staff user. Returns `true` if a row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE staff_users SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
