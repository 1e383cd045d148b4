//! Repository for the `call_recordings` table.

use agencybrain_core::types::DbId;
use sqlx::PgPool;

use crate::models::call_recording::{CallRecording, CreateCallRecording};

const COLUMNS: &str =
    "id, agency_id, staff_user_id, title, transcript_segments, created_at, updated_at";

pub struct CallRecordingRepo;

impl CallRecordingRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCallRecording,
    ) -> Result<CallRecording, sqlx::Error> {
        let query = format!(
            "INSERT INTO call_recordings (agency_id, staff_user_id, title, transcript_segments)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CallRecording>(&query)
            .bind(input.agency_id)
            .bind(input.staff_user_id)
            .bind(&input.title)
            .bind(&input.transcript_segments)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CallRecording>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM call_recordings WHERE id = $1");
        sqlx::query_as::<_, CallRecording>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
