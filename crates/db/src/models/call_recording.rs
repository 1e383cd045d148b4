//! Recorded sales calls used by call-scoring Q&A.

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `call_recordings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CallRecording {
    pub id: DbId,
    pub agency_id: DbId,
    pub staff_user_id: Option<DbId>,
    pub title: String,
    pub transcript_segments: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for storing a call transcript.
pub struct CreateCallRecording {
    pub agency_id: DbId,
    pub staff_user_id: Option<DbId>,
    pub title: String,
    pub transcript_segments: serde_json::Value,
}
