//! Repository for the `profiles` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{CreateProfile, Profile};

const COLUMNS: &str = "id, auth_user_id, agency_id, full_name, role, created_at, updated_at";

/// Maps hosted-auth users onto agencies.
pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles (auth_user_id, agency_id, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(input.auth_user_id)
            .bind(input.agency_id)
            .bind(&input.full_name)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find the profile belonging to a hosted-auth user id (JWT `sub`).
    pub async fn find_by_auth_user_id(
        pool: &PgPool,
        auth_user_id: Uuid,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE auth_user_id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(auth_user_id)
            .fetch_optional(pool)
            .await
    }
}
