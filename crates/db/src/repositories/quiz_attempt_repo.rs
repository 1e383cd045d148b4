//! Repository for the `quiz_attempts` table.

use agencybrain_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::quiz_attempt::{CreateQuizAttempt, QuizAttempt};

const COLUMNS: &str = "id, progress_id, answers, score_percent, passed, created_at";

pub struct QuizAttemptRepo;

impl QuizAttemptRepo {
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateQuizAttempt,
    ) -> Result<QuizAttempt, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_attempts (progress_id, answers, score_percent, passed)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizAttempt>(&query)
            .bind(input.progress_id)
            .bind(&input.answers)
            .bind(input.score_percent)
            .bind(input.passed)
            .fetch_one(executor)
            .await
    }

    /// Attempts for a progress row, newest first.
    pub async fn list_for_progress(
        pool: &PgPool,
        progress_id: DbId,
    ) -> Result<Vec<QuizAttempt>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quiz_attempts
             WHERE progress_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, QuizAttempt>(&query)
            .bind(progress_id)
            .fetch_all(pool)
            .await
    }
}
