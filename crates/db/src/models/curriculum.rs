//! Program modules (weeks) and lessons.

use agencybrain_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `program_modules` table: one week of curriculum.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgramModule {
    pub id: DbId,
    pub program: String,
    pub week_number: i16,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a module.
#[derive(Debug, Clone)]
pub struct CreateModule {
    pub program: String,
    pub week_number: i16,
    pub title: String,
    pub description: Option<String>,
}

/// A row from the `program_lessons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lesson {
    pub id: DbId,
    pub module_id: DbId,
    pub day_of_week: i16,
    pub title: String,
    pub content: String,
    pub staff_visible: bool,
    pub quiz_questions: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a lesson.
#[derive(Debug, Clone)]
pub struct CreateLesson {
    pub module_id: DbId,
    pub day_of_week: i16,
    pub title: String,
    pub content: String,
    pub staff_visible: bool,
    pub quiz_questions: serde_json::Value,
}

/// A lesson joined with the week number and program of its module.
#[derive(Debug, Clone, FromRow)]
pub struct LessonWithModule {
    pub id: DbId,
    pub module_id: DbId,
    pub day_of_week: i16,
    pub title: String,
    pub content: String,
    pub staff_visible: bool,
    pub quiz_questions: serde_json::Value,
    pub week_number: i16,
    pub program: String,
}
