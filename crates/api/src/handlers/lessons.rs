//! Handlers for learner actions on a single lesson.
//!
//! Progress rows are created lazily on first interaction. Start and complete
//! are idempotent: repeating them returns the current progress unchanged.

use std::collections::HashMap;

use agencybrain_core::quiz::{self, QuizGrade};
use agencybrain_core::status::LessonStatus;
use agencybrain_core::types::{DbId, Timestamp};
use agencybrain_db::models::progress::LessonProgress;
use agencybrain_db::models::quiz_attempt::CreateQuizAttempt;
use agencybrain_db::repositories::{ProgressRepo, QuizAttemptRepo};
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::program::load_lesson_context;
use crate::middleware::auth::Caller;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Progress of the caller on one lesson.
#[derive(Debug, Serialize)]
pub struct LessonProgressView {
    pub lesson_id: DbId,
    pub status: LessonStatus,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub quiz_score: Option<i16>,
}

impl LessonProgressView {
    fn from_row(row: &LessonProgress) -> AppResult<Self> {
        Ok(Self {
            lesson_id: row.lesson_id,
            status: row.status()?,
            started_at: row.started_at,
            completed_at: row.completed_at,
            quiz_score: row.quiz_score,
        })
    }
}

/// Request body for `POST /lessons/{id}/quiz`: question id -> option index.
#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    pub answers: HashMap<String, usize>,
}

/// Result of a graded quiz submission.
#[derive(Debug, Serialize)]
pub struct QuizResult {
    pub attempt_id: DbId,
    #[serde(flatten)]
    pub grade: QuizGrade,
    pub pass_percent: u32,
    /// Best score recorded across all attempts.
    pub best_score: Option<i16>,
    pub progress: LessonProgressView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/lessons/{id}/start
pub async fn start(
    State(state): State<AppState>,
    caller: Caller,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LessonProgressView>>> {
    advance(&state, &caller, lesson_id, LessonStatus::InProgress).await
}

/// POST /api/v1/lessons/{id}/complete
///
/// Completing does not require a passing quiz.
pub async fn complete(
    State(state): State<AppState>,
    caller: Caller,
    Path(lesson_id): Path<DbId>,
) -> AppResult<Json<DataResponse<LessonProgressView>>> {
    advance(&state, &caller, lesson_id, LessonStatus::Completed).await
}

/// POST /api/v1/lessons/{id}/quiz
///
/// Grades the submission, records the attempt, keeps the best score, and
/// completes the lesson on a pass.
pub async fn submit_quiz(
    State(state): State<AppState>,
    caller: Caller,
    Path(lesson_id): Path<DbId>,
    Json(input): Json<QuizSubmission>,
) -> AppResult<Json<DataResponse<QuizResult>>> {
    let ctx = load_lesson_context(&state.pool, &caller, lesson_id).await?;
    ctx.require_unlocked()?;

    let questions = quiz::parse_questions(&ctx.lesson.quiz_questions)?;
    let grade = quiz::grade(&questions, &input.answers, state.config.quiz_pass_percent)?;

    let answers = serde_json::to_value(&input.answers)
        .map_err(|e| AppError::InternalError(format!("Failed to encode quiz answers: {e}")))?;

    // Attempt history, best score, and completion commit together.
    let mut tx = state.pool.begin().await?;

    let progress = ProgressRepo::get_or_create(
        &mut *tx,
        ctx.learner_key(&caller),
        lesson_id,
        LessonStatus::Available,
    )
    .await?;

    let attempt = QuizAttemptRepo::create(
        &mut *tx,
        &CreateQuizAttempt {
            progress_id: progress.id,
            answers,
            score_percent: grade.score_percent as i16,
            passed: grade.passed,
        },
    )
    .await?;

    let mut progress =
        ProgressRepo::record_quiz_score(&mut *tx, progress.id, grade.score_percent as i16)
            .await?;

    if grade.passed && progress.status()? != LessonStatus::Completed {
        progress =
            ProgressRepo::set_status(&mut *tx, progress.id, LessonStatus::Completed).await?;
    }

    tx.commit().await?;

    tracing::info!(
        lesson_id,
        learner_kind = caller.learner_kind(),
        learner_id = caller.learner_id(),
        score = grade.score_percent,
        passed = grade.passed,
        "Quiz submitted"
    );

    Ok(Json(DataResponse {
        data: QuizResult {
            attempt_id: attempt.id,
            grade,
            pass_percent: state.config.quiz_pass_percent,
            best_score: progress.quiz_score,
            progress: LessonProgressView::from_row(&progress)?,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Move the caller's progress on an unlocked lesson towards `target`.
///
/// Progress already at or past `target` is returned unchanged.
async fn advance(
    state: &AppState,
    caller: &Caller,
    lesson_id: DbId,
    target: LessonStatus,
) -> AppResult<Json<DataResponse<LessonProgressView>>> {
    let ctx = load_lesson_context(&state.pool, caller, lesson_id).await?;
    ctx.require_unlocked()?;

    let mut progress = ProgressRepo::get_or_create(
        &state.pool,
        ctx.learner_key(caller),
        lesson_id,
        LessonStatus::Available,
    )
    .await?;

    let current = LessonStatus::effective(Some(progress.status()?), true);
    if current.can_transition(target) {
        progress = ProgressRepo::set_status(&state.pool, progress.id, target).await?;
        tracing::info!(
            lesson_id,
            learner_kind = caller.learner_kind(),
            learner_id = caller.learner_id(),
            from = current.name(),
            to = target.name(),
            "Lesson progress updated"
        );
    }

    Ok(Json(DataResponse {
        data: LessonProgressView::from_row(&progress)?,
    }))
}
