//! Repository for the `agencies` table.

use agencybrain_core::types::DbId;
use sqlx::PgPool;

use crate::models::agency::{Agency, CreateAgency};

const COLUMNS: &str = "id, name, timezone, created_at, updated_at";

pub struct AgencyRepo;

impl AgencyRepo {
    pub async fn create(pool: &PgPool, input: &CreateAgency) -> Result<Agency, sqlx::Error> {
        let query = format!(
            "INSERT INTO agencies (name, timezone) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Agency>(&query)
            .bind(&input.name)
            .bind(&input.timezone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Agency>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM agencies WHERE id = $1");
        sqlx::query_as::<_, Agency>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
