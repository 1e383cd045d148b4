//! Per-learner lesson progress.

use agencybrain_core::error::CoreError;
use agencybrain_core::status::{LessonStatus, StatusId};
use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `lesson_progress` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LessonProgress {
    pub id: DbId,
    pub assignment_id: DbId,
    pub learner_kind: String,
    pub learner_id: DbId,
    pub lesson_id: DbId,
    pub status_id: StatusId,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub quiz_score: Option<i16>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LessonProgress {
    pub fn status(&self) -> Result<LessonStatus, CoreError> {
        LessonStatus::from_id(self.status_id)
    }
}

/// Identifies whose progress a row tracks.
#[derive(Debug, Clone, Copy)]
pub struct LearnerKey<'a> {
    pub assignment_id: DbId,
    pub learner_kind: &'a str,
    pub learner_id: DbId,
}
