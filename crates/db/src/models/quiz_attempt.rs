//! Quiz attempt history.

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `quiz_attempts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizAttempt {
    pub id: DbId,
    pub progress_id: DbId,
    pub answers: serde_json::Value,
    pub score_percent: i16,
    pub passed: bool,
    pub created_at: Timestamp,
}

/// DTO for recording an attempt.
pub struct CreateQuizAttempt {
    pub progress_id: DbId,
    pub answers: serde_json::Value,
    pub score_percent: i16,
    pub passed: bool,
}
