//! Repository for `program_modules` and `program_lessons`.

use agencybrain_core::types::DbId;
use sqlx::PgPool;

use crate::models::curriculum::{
    CreateLesson, CreateModule, Lesson, LessonWithModule, ProgramModule,
};

const MODULE_COLUMNS: &str =
    "id, program, week_number, title, description, created_at, updated_at";

const LESSON_COLUMNS: &str = "id, module_id, day_of_week, title, content, staff_visible, \
                               quiz_questions, created_at, updated_at";

/// Lesson columns qualified for joins against `program_modules m`.
const JOINED_COLUMNS: &str = "l.id, l.module_id, l.day_of_week, l.title, l.content, \
                               l.staff_visible, l.quiz_questions, m.week_number, m.program";

/// Read and seed access to curriculum content.
pub struct CurriculumRepo;

impl CurriculumRepo {
    pub async fn create_module(
        pool: &PgPool,
        input: &CreateModule,
    ) -> Result<ProgramModule, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_modules (program, week_number, title, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {MODULE_COLUMNS}"
        );
        sqlx::query_as::<_, ProgramModule>(&query)
            .bind(&input.program)
            .bind(input.week_number)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn create_lesson(pool: &PgPool, input: &CreateLesson) -> Result<Lesson, sqlx::Error> {
        let query = format!(
            "INSERT INTO program_lessons
                (module_id, day_of_week, title, content, staff_visible, quiz_questions)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LESSON_COLUMNS}"
        );
        sqlx::query_as::<_, Lesson>(&query)
            .bind(input.module_id)
            .bind(input.day_of_week)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.staff_visible)
            .bind(&input.quiz_questions)
            .fetch_one(pool)
            .await
    }

    /// All modules of a program ordered by week.
    pub async fn list_modules(
        pool: &PgPool,
        program: &str,
    ) -> Result<Vec<ProgramModule>, sqlx::Error> {
        let query = format!(
            "SELECT {MODULE_COLUMNS} FROM program_modules
             WHERE program = $1
             ORDER BY week_number"
        );
        sqlx::query_as::<_, ProgramModule>(&query)
            .bind(program)
            .fetch_all(pool)
            .await
    }

    /// All lessons of a program ordered by week, then day, then id.
    ///
    /// With `staff_only`, lessons hidden from the staff portal are skipped.
    pub async fn list_lessons(
        pool: &PgPool,
        program: &str,
        staff_only: bool,
    ) -> Result<Vec<LessonWithModule>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM program_lessons l
             JOIN program_modules m ON m.id = l.module_id
             WHERE m.program = $1 AND ($2 = false OR l.staff_visible)
             ORDER BY m.week_number, l.day_of_week, l.id"
        );
        sqlx::query_as::<_, LessonWithModule>(&query)
            .bind(program)
            .bind(staff_only)
            .fetch_all(pool)
            .await
    }

    /// A single lesson with its module's week number and program.
    pub async fn find_lesson(
        pool: &PgPool,
        lesson_id: DbId,
    ) -> Result<Option<LessonWithModule>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM program_lessons l
             JOIN program_modules m ON m.id = l.module_id
             WHERE l.id = $1"
        );
        sqlx::query_as::<_, LessonWithModule>(&query)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await
    }
}
