//! Shared program views built on the business-day unlock calculator.
//!
//! Every curriculum endpoint (Sales Experience, Challenge, lesson actions)
//! goes through [`load_schedule`] so the week/day arithmetic lives in one
//! place: `agencybrain_core::curriculum`.

use std::collections::HashMap;

use agencybrain_core::curriculum::{resolve_timezone, today_in_timezone, ProgramSchedule};
use agencybrain_core::error::CoreError;
use agencybrain_core::program::ProgramKind;
use agencybrain_core::quiz::{parse_questions, PublicQuizQuestion};
use agencybrain_core::status::{AssignmentStatus, LessonStatus};
use agencybrain_core::types::{CalendarDate, DbId};
use agencybrain_db::models::assignment::Assignment;
use agencybrain_db::models::curriculum::LessonWithModule;
use agencybrain_db::models::progress::{LearnerKey, LessonProgress};
use agencybrain_db::repositories::{AgencyRepo, AssignmentRepo, CurriculumRepo, ProgressRepo};
use chrono::Utc;
use chrono_tz::Tz;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::Caller;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Summary of the assignment a program view is computed for.
#[derive(Debug, Serialize)]
pub struct AssignmentSummary {
    pub id: DbId,
    pub status: AssignmentStatus,
    pub start_date: Option<CalendarDate>,
}

/// One lesson as seen by a learner.
#[derive(Debug, Serialize)]
pub struct LessonView {
    pub id: DbId,
    pub day_of_week: i16,
    pub title: String,
    /// Lesson body; withheld while the lesson is locked.
    pub content: Option<String>,
    pub staff_visible: bool,
    pub is_unlocked: bool,
    pub status: LessonStatus,
    pub quiz_score: Option<i16>,
    pub quiz: Vec<PublicQuizQuestion>,
}

/// One week of a program.
#[derive(Debug, Serialize)]
pub struct ModuleView {
    pub id: DbId,
    pub week_number: i16,
    pub title: String,
    pub description: Option<String>,
    pub lessons: Vec<LessonView>,
}

/// Full program view returned by the program endpoints.
#[derive(Debug, Serialize)]
pub struct ProgramOverview {
    pub program: ProgramKind,
    pub assignment: AssignmentSummary,
    /// The agency-local date the schedule was evaluated for.
    pub today: CalendarDate,
    pub timezone: String,
    pub started: bool,
    pub current_week: u32,
    /// Business days elapsed since the start date, inclusive.
    pub current_business_day: u32,
    pub day_in_week: u32,
    pub modules: Vec<ModuleView>,
}

// ---------------------------------------------------------------------------
// Schedule resolution
// ---------------------------------------------------------------------------

/// An assignment together with its schedule for "today".
pub struct ScheduledAssignment {
    pub assignment: Assignment,
    pub schedule: ProgramSchedule,
    pub today: CalendarDate,
    pub timezone: String,
}

/// Resolve an agency's timezone name, falling back to UTC when the stored
/// value is not a known IANA zone.
fn agency_timezone(agency_id: DbId, name: &str) -> Tz {
    match resolve_timezone(name) {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!(agency_id, timezone = %name, error = %e, "Falling back to UTC");
            Tz::UTC
        }
    }
}

/// Load the caller's current assignment for `program` and evaluate its
/// schedule on the agency-local date (or on `as_of` when previewing).
pub async fn load_schedule(
    pool: &PgPool,
    agency_id: DbId,
    program: ProgramKind,
    as_of: Option<CalendarDate>,
) -> AppResult<ScheduledAssignment> {
    let agency = AgencyRepo::find_by_id(pool, agency_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Agency",
            id: agency_id,
        }))?;

    let tz = agency_timezone(agency.id, &agency.timezone);
    let today = as_of.unwrap_or_else(|| today_in_timezone(Utc::now(), tz));

    let assignment = AssignmentRepo::find_current_for_agency(pool, agency_id, program.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Assignment for agency",
            id: agency_id,
        }))?;

    let schedule = ProgramSchedule::for_assignment(
        assignment.status()?,
        assignment.start_date,
        today,
        program.max_weeks(),
    )?;

    tracing::debug!(
        agency_id,
        assignment_id = assignment.id,
        %program,
        %today,
        current_week = schedule.current_week,
        day_in_week = schedule.day_in_week,
        "Evaluated program schedule"
    );

    Ok(ScheduledAssignment {
        assignment,
        schedule,
        today,
        timezone: tz.name().to_string(),
    })
}

/// Whether a lesson is unlocked under `schedule`.
pub fn lesson_is_unlocked(schedule: &ProgramSchedule, lesson: &LessonWithModule) -> bool {
    let week = u32::try_from(lesson.week_number).unwrap_or(0);
    let day = u32::try_from(lesson.day_of_week).unwrap_or(0);
    schedule.is_unlocked(week, day)
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

/// Build the program view for `caller`.
///
/// Staff callers only see `staff_visible` lessons.
pub async fn build_overview(
    pool: &PgPool,
    caller: &Caller,
    program: ProgramKind,
    as_of: Option<CalendarDate>,
) -> AppResult<ProgramOverview> {
    let scheduled = load_schedule(pool, caller.agency_id(), program, as_of).await?;
    let schedule = scheduled.schedule;

    let modules = CurriculumRepo::list_modules(pool, program.as_str()).await?;
    let lessons = CurriculumRepo::list_lessons(pool, program.as_str(), caller.is_staff()).await?;

    let key = LearnerKey {
        assignment_id: scheduled.assignment.id,
        learner_kind: caller.learner_kind(),
        learner_id: caller.learner_id(),
    };
    let progress: HashMap<DbId, LessonProgress> = ProgressRepo::list_for_learner(pool, key)
        .await?
        .into_iter()
        .map(|p| (p.lesson_id, p))
        .collect();

    let mut by_module: HashMap<DbId, Vec<LessonView>> = HashMap::new();
    for lesson in lessons {
        let module_id = lesson.module_id;
        let stored = progress.get(&lesson.id);
        by_module
            .entry(module_id)
            .or_default()
            .push(lesson_view(&schedule, lesson, stored)?);
    }

    let modules = modules
        .into_iter()
        .map(|m| ModuleView {
            lessons: by_module.remove(&m.id).unwrap_or_default(),
            id: m.id,
            week_number: m.week_number,
            title: m.title,
            description: m.description,
        })
        .collect();

    Ok(ProgramOverview {
        program,
        assignment: AssignmentSummary {
            id: scheduled.assignment.id,
            status: scheduled.assignment.status()?,
            start_date: scheduled.assignment.start_date,
        },
        today: scheduled.today,
        timezone: scheduled.timezone,
        started: schedule.started,
        current_week: schedule.current_week,
        current_business_day: schedule.business_days_elapsed,
        day_in_week: schedule.day_in_week,
        modules,
    })
}

fn lesson_view(
    schedule: &ProgramSchedule,
    lesson: LessonWithModule,
    stored: Option<&LessonProgress>,
) -> Result<LessonView, CoreError> {
    let is_unlocked = lesson_is_unlocked(schedule, &lesson);
    let stored_status = stored.map(LessonProgress::status).transpose()?;
    let quiz = parse_questions(&lesson.quiz_questions)?
        .iter()
        .map(PublicQuizQuestion::from)
        .collect();

    Ok(LessonView {
        id: lesson.id,
        day_of_week: lesson.day_of_week,
        title: lesson.title,
        content: is_unlocked.then_some(lesson.content),
        staff_visible: lesson.staff_visible,
        is_unlocked,
        status: LessonStatus::effective(stored_status, is_unlocked),
        quiz_score: stored.and_then(|p| p.quiz_score),
        quiz,
    })
}

// ---------------------------------------------------------------------------
// Lesson context
// ---------------------------------------------------------------------------

/// A lesson resolved for a learner action, with its unlock state.
pub struct LessonContext {
    pub lesson: LessonWithModule,
    pub assignment: Assignment,
    pub is_unlocked: bool,
}

impl LessonContext {
    /// Progress key of `caller` for this lesson's assignment.
    pub fn learner_key<'a>(&self, caller: &'a Caller) -> LearnerKey<'a> {
        LearnerKey {
            assignment_id: self.assignment.id,
            learner_kind: caller.learner_kind(),
            learner_id: caller.learner_id(),
        }
    }

    /// Fail with 403 unless the lesson is unlocked.
    pub fn require_unlocked(&self) -> Result<(), CoreError> {
        if self.is_unlocked {
            Ok(())
        } else {
            Err(CoreError::Forbidden("Lesson is locked".into()))
        }
    }
}

/// Resolve `lesson_id` for `caller`.
///
/// Staff callers cannot see lessons that are not `staff_visible`; those
/// resolve as not found, as do lessons of a program the caller's agency is
/// not assigned.
pub async fn load_lesson_context(
    pool: &PgPool,
    caller: &Caller,
    lesson_id: DbId,
) -> AppResult<LessonContext> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Lesson",
            id: lesson_id,
        })
    };

    let lesson = CurriculumRepo::find_lesson(pool, lesson_id)
        .await?
        .ok_or_else(not_found)?;
    if caller.is_staff() && !lesson.staff_visible {
        return Err(not_found());
    }

    let program = ProgramKind::parse(&lesson.program)?;
    let scheduled = load_schedule(pool, caller.agency_id(), program, None).await?;
    let is_unlocked = lesson_is_unlocked(&scheduled.schedule, &lesson);

    Ok(LessonContext {
        lesson,
        assignment: scheduled.assignment,
        is_unlocked,
    })
}
