//! Repository for the `lesson_progress` table.

use agencybrain_core::status::LessonStatus;
use agencybrain_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::progress::{LearnerKey, LessonProgress};

const COLUMNS: &str = "id, assignment_id, learner_kind, learner_id, lesson_id, status_id, \
                        started_at, completed_at, quiz_score, created_at, updated_at";

/// Provides lazy creation and status updates for lesson progress.
///
/// Write methods accept any executor so a handler can group them in one
/// transaction.
pub struct ProgressRepo;

impl ProgressRepo {
    /// All progress rows for one learner within an assignment.
    pub async fn list_for_learner(
        pool: &PgPool,
        key: LearnerKey<'_>,
    ) -> Result<Vec<LessonProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lesson_progress
             WHERE assignment_id = $1 AND learner_kind = $2 AND learner_id = $3
             ORDER BY lesson_id"
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(key.assignment_id)
            .bind(key.learner_kind)
            .bind(key.learner_id)
            .fetch_all(pool)
            .await
    }

    /// Get the progress row for a lesson, creating it with `initial` status
    /// on first interaction.
    ///
    /// Uses a no-op `DO UPDATE` so `RETURNING` always produces a row even
    /// when a concurrent request created it first.
    pub async fn get_or_create(
        executor: impl PgExecutor<'_>,
        key: LearnerKey<'_>,
        lesson_id: DbId,
        initial: LessonStatus,
    ) -> Result<LessonProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO lesson_progress (assignment_id, learner_kind, learner_id, lesson_id, status_id)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (assignment_id, learner_kind, learner_id, lesson_id)
             DO UPDATE SET lesson_id = lesson_progress.lesson_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(key.assignment_id)
            .bind(key.learner_kind)
            .bind(key.learner_id)
            .bind(lesson_id)
            .bind(initial.id())
            .fetch_one(executor)
            .await
    }

    /// Set the status of a progress row, stamping `started_at` on the first
    /// move into `in_progress`/`completed` and `completed_at` on completion.
    pub async fn set_status(
        executor: impl PgExecutor<'_>,
        id: DbId,
        status: LessonStatus,
    ) -> Result<LessonProgress, sqlx::Error> {
        let query = format!(
            "UPDATE lesson_progress SET
                status_id = $2,
                started_at = CASE WHEN $2::SMALLINT >= $3::SMALLINT THEN COALESCE(started_at, NOW()) ELSE started_at END,
                completed_at = CASE WHEN $2::SMALLINT = $4::SMALLINT THEN COALESCE(completed_at, NOW()) ELSE completed_at END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(id)
            .bind(status.id())
            .bind(LessonStatus::InProgress.id())
            .bind(LessonStatus::Completed.id())
            .fetch_one(executor)
            .await
    }

    /// Store the best quiz score seen so far.
    pub async fn record_quiz_score(
        executor: impl PgExecutor<'_>,
        id: DbId,
        score_percent: i16,
    ) -> Result<LessonProgress, sqlx::Error> {
        let query = format!(
            "UPDATE lesson_progress SET quiz_score = GREATEST(COALESCE(quiz_score, 0), $2)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LessonProgress>(&query)
            .bind(id)
            .bind(score_percent)
            .fetch_one(executor)
            .await
    }
}
