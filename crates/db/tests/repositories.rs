//! Repository behaviour against a real database.

use agencybrain_core::roles::{LEARNER_OWNER, LEARNER_STAFF};
use agencybrain_core::status::{AssignmentStatus, LessonStatus};
use agencybrain_db::models::agency::{Agency, CreateAgency};
use agencybrain_db::models::assignment::{Assignment, CreateAssignment};
use agencybrain_db::models::curriculum::{CreateLesson, CreateModule, Lesson};
use agencybrain_db::models::progress::LearnerKey;
use agencybrain_db::models::quiz_attempt::CreateQuizAttempt;
use agencybrain_db::models::staff::{CreateStaffSession, CreateStaffUser, StaffUser};
use agencybrain_db::repositories::{
    AgencyRepo, AssignmentRepo, CurriculumRepo, ProgressRepo, QuizAttemptRepo, StaffRepo,
    StaffSessionRepo,
};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn agency(pool: &PgPool) -> Agency {
    AgencyRepo::create(
        pool,
        &CreateAgency {
            name: "Harbor Insurance".to_string(),
            timezone: "America/Chicago".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn assignment(pool: &PgPool, agency_id: i64, start: Option<NaiveDate>) -> Assignment {
    AssignmentRepo::create(
        pool,
        &CreateAssignment {
            agency_id,
            program: "sales_experience".to_string(),
            start_date: start,
        },
    )
    .await
    .unwrap()
}

async fn staff(pool: &PgPool, agency_id: i64, username: &str) -> StaffUser {
    StaffRepo::create(
        pool,
        &CreateStaffUser {
            agency_id,
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            display_name: username.to_string(),
        },
    )
    .await
    .unwrap()
}

async fn lesson(pool: &PgPool, program: &str, week: i16, day: i16, staff_visible: bool) -> Lesson {
    let module = match CurriculumRepo::list_modules(pool, program)
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.week_number == week)
    {
        Some(m) => m,
        None => CurriculumRepo::create_module(
            pool,
            &CreateModule {
                program: program.to_string(),
                week_number: week,
                title: format!("Week {week}"),
                description: Some("Coaching".to_string()),
            },
        )
        .await
        .unwrap(),
    };

    CurriculumRepo::create_lesson(
        pool,
        &CreateLesson {
            module_id: module.id,
            day_of_week: day,
            title: format!("W{week}D{day}"),
            content: "Body".to_string(),
            staff_visible,
            quiz_questions: json!([]),
        },
    )
    .await
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn new_assignments_are_pending(pool: PgPool) {
    let a = agency(&pool).await;
    let created = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    assert_eq!(created.status().unwrap(), AssignmentStatus::Pending);
    assert_eq!(created.start_date, Some(date(2024, 1, 1)));
}

#[sqlx::test(migrations = "./migrations")]
async fn start_date_only_changes_while_pending(pool: PgPool) {
    let a = agency(&pool).await;
    let created = assignment(&pool, a.id, None).await;

    let updated = AssignmentRepo::update_start_date(&pool, created.id, date(2024, 2, 5))
        .await
        .unwrap()
        .expect("pending assignment should accept a start date");
    assert_eq!(updated.start_date, Some(date(2024, 2, 5)));

    AssignmentRepo::transition(
        &pool,
        created.id,
        AssignmentStatus::Pending,
        AssignmentStatus::Active,
    )
    .await
    .unwrap()
    .unwrap();

    let frozen = AssignmentRepo::update_start_date(&pool, created.id, date(2024, 3, 4))
        .await
        .unwrap();
    assert!(frozen.is_none());

    let reloaded = AssignmentRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.start_date, Some(date(2024, 2, 5)));
}

#[sqlx::test(migrations = "./migrations")]
async fn transition_is_compare_and_set(pool: PgPool) {
    let a = agency(&pool).await;
    let created = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;

    let wrong_from = AssignmentRepo::transition(
        &pool,
        created.id,
        AssignmentStatus::Active,
        AssignmentStatus::Completed,
    )
    .await
    .unwrap();
    assert!(wrong_from.is_none());

    let active = AssignmentRepo::transition(
        &pool,
        created.id,
        AssignmentStatus::Pending,
        AssignmentStatus::Active,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(active.status().unwrap(), AssignmentStatus::Active);
}

#[sqlx::test(migrations = "./migrations")]
async fn one_open_assignment_per_program(pool: PgPool) {
    let a = agency(&pool).await;
    let first = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;

    let duplicate = AssignmentRepo::create(
        &pool,
        &CreateAssignment {
            agency_id: a.id,
            program: "sales_experience".to_string(),
            start_date: None,
        },
    )
    .await;
    let err = duplicate.unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("uq_program_assignments_open"));

    // A different program is independent.
    AssignmentRepo::create(
        &pool,
        &CreateAssignment {
            agency_id: a.id,
            program: "challenge".to_string(),
            start_date: None,
        },
    )
    .await
    .unwrap();

    // Completing the first frees the slot, and the new one becomes current.
    for (from, to) in [
        (AssignmentStatus::Pending, AssignmentStatus::Active),
        (AssignmentStatus::Active, AssignmentStatus::Completed),
    ] {
        AssignmentRepo::transition(&pool, first.id, from, to)
            .await
            .unwrap()
            .unwrap();
    }
    let second = assignment(&pool, a.id, Some(date(2024, 6, 3))).await;

    let current = AssignmentRepo::find_current_for_agency(&pool, a.id, "sales_experience")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.id, second.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn completed_assignment_is_still_current_when_alone(pool: PgPool) {
    let a = agency(&pool).await;
    let only = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    for (from, to) in [
        (AssignmentStatus::Pending, AssignmentStatus::Active),
        (AssignmentStatus::Active, AssignmentStatus::Completed),
    ] {
        AssignmentRepo::transition(&pool, only.id, from, to)
            .await
            .unwrap()
            .unwrap();
    }

    let current = AssignmentRepo::find_current_for_agency(&pool, a.id, "sales_experience")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(current.id, only.id);
    assert!(
        AssignmentRepo::find_current_for_agency(&pool, a.id, "challenge")
            .await
            .unwrap()
            .is_none()
    );
}

// ---------------------------------------------------------------------------
// Curriculum
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn lessons_are_ordered_and_filterable(pool: PgPool) {
    let w2 = lesson(&pool, "sales_experience", 2, 1, true).await;
    let w1_fri = lesson(&pool, "sales_experience", 1, 5, true).await;
    let w1_mon = lesson(&pool, "sales_experience", 1, 1, false).await;
    lesson(&pool, "challenge", 1, 2, true).await;

    let all = CurriculumRepo::list_lessons(&pool, "sales_experience", false)
        .await
        .unwrap();
    let ids: Vec<i64> = all.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![w1_mon.id, w1_fri.id, w2.id]);
    assert_eq!(all[2].week_number, 2);
    assert_eq!(all[2].program, "sales_experience");

    let staff_only = CurriculumRepo::list_lessons(&pool, "sales_experience", true)
        .await
        .unwrap();
    let ids: Vec<i64> = staff_only.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![w1_fri.id, w2.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn module_week_is_unique_per_program(pool: PgPool) {
    let input = CreateModule {
        program: "challenge".to_string(),
        week_number: 1,
        title: "Week 1".to_string(),
        description: None,
    };
    CurriculumRepo::create_module(&pool, &input).await.unwrap();
    let err = CurriculumRepo::create_module(&pool, &input).await.unwrap_err();
    assert_eq!(
        err.as_database_error().unwrap().constraint(),
        Some("uq_program_modules_week")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn module_week_is_bounded_by_program_length(pool: PgPool) {
    let module = |program: &str, week_number: i16| CreateModule {
        program: program.to_string(),
        week_number,
        title: format!("Week {week_number}"),
        description: None,
    };

    CurriculumRepo::create_module(&pool, &module("challenge", 6)).await.unwrap();
    CurriculumRepo::create_module(&pool, &module("sales_experience", 8)).await.unwrap();

    for (program, week) in [("challenge", 7), ("sales_experience", 9), ("challenge", 0)] {
        let err = CurriculumRepo::create_module(&pool, &module(program, week))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_database_error().unwrap().constraint(),
            Some("ck_program_modules_week_range"),
            "{program} week {week} should be rejected"
        );
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn get_or_create_converges_on_one_row(pool: PgPool) {
    let a = agency(&pool).await;
    let assigned = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    let l = lesson(&pool, "sales_experience", 1, 1, true).await;
    let key = LearnerKey {
        assignment_id: assigned.id,
        learner_kind: LEARNER_OWNER,
        learner_id: 7,
    };

    let first = ProgressRepo::get_or_create(&pool, key, l.id, LessonStatus::Available)
        .await
        .unwrap();
    ProgressRepo::set_status(&pool, first.id, LessonStatus::InProgress)
        .await
        .unwrap();

    let again = ProgressRepo::get_or_create(&pool, key, l.id, LessonStatus::Available)
        .await
        .unwrap();
    assert_eq!(again.id, first.id);
    assert_eq!(again.status().unwrap(), LessonStatus::InProgress);

    let staff_key = LearnerKey {
        learner_kind: LEARNER_STAFF,
        ..key
    };
    let other = ProgressRepo::get_or_create(&pool, staff_key, l.id, LessonStatus::Available)
        .await
        .unwrap();
    assert_ne!(other.id, first.id);

    assert_eq!(ProgressRepo::list_for_learner(&pool, key).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn set_status_stamps_timestamps_once(pool: PgPool) {
    let a = agency(&pool).await;
    let assigned = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    let l = lesson(&pool, "sales_experience", 1, 1, true).await;
    let key = LearnerKey {
        assignment_id: assigned.id,
        learner_kind: LEARNER_OWNER,
        learner_id: 1,
    };

    let row = ProgressRepo::get_or_create(&pool, key, l.id, LessonStatus::Available)
        .await
        .unwrap();
    assert!(row.started_at.is_none());

    let started = ProgressRepo::set_status(&pool, row.id, LessonStatus::InProgress)
        .await
        .unwrap();
    assert!(started.started_at.is_some());
    assert!(started.completed_at.is_none());

    let completed = ProgressRepo::set_status(&pool, row.id, LessonStatus::Completed)
        .await
        .unwrap();
    assert_eq!(completed.started_at, started.started_at);
    assert!(completed.completed_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn quiz_score_keeps_the_best(pool: PgPool) {
    let a = agency(&pool).await;
    let assigned = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    let l = lesson(&pool, "sales_experience", 1, 1, true).await;
    let key = LearnerKey {
        assignment_id: assigned.id,
        learner_kind: LEARNER_OWNER,
        learner_id: 1,
    };
    let row = ProgressRepo::get_or_create(&pool, key, l.id, LessonStatus::Available)
        .await
        .unwrap();

    for (score, expected) in [(67, 67), (33, 67), (100, 100)] {
        QuizAttemptRepo::create(
            &pool,
            &CreateQuizAttempt {
                progress_id: row.id,
                answers: json!({}),
                score_percent: score,
                passed: score >= 70,
            },
        )
        .await
        .unwrap();
        let updated = ProgressRepo::record_quiz_score(&pool, row.id, score)
            .await
            .unwrap();
        assert_eq!(updated.quiz_score, Some(expected));
    }

    let attempts = QuizAttemptRepo::list_for_progress(&pool, row.id).await.unwrap();
    assert_eq!(attempts.len(), 3);
}

// ---------------------------------------------------------------------------
// Staff users and sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn username_lookup_ignores_case(pool: PgPool) {
    let a = agency(&pool).await;
    let created = staff(&pool, a.id, "Dana").await;

    let found = StaffRepo::find_by_username(&pool, "dana").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(StaffRepo::find_by_username(&pool, "dan").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn sessions_expire_and_revoke(pool: PgPool) {
    let a = agency(&pool).await;
    let user = staff(&pool, a.id, "csr1").await;

    let live = StaffSessionRepo::create(
        &pool,
        &CreateStaffSession {
            staff_user_id: user.id,
            token_hash: "live".to_string(),
            expires_at: Utc::now() + Duration::hours(1),
        },
    )
    .await
    .unwrap();
    StaffSessionRepo::create(
        &pool,
        &CreateStaffSession {
            staff_user_id: user.id,
            token_hash: "stale".to_string(),
            expires_at: Utc::now() - Duration::hours(48),
        },
    )
    .await
    .unwrap();

    assert!(StaffSessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .is_some());
    assert!(StaffSessionRepo::find_active_by_token_hash(&pool, "stale")
        .await
        .unwrap()
        .is_none());

    assert!(StaffSessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(!StaffSessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(StaffSessionRepo::find_active_by_token_hash(&pool, "live")
        .await
        .unwrap()
        .is_none());

    let purged = StaffSessionRepo::cleanup_expired(&pool, Utc::now() - Duration::hours(24))
        .await
        .unwrap();
    assert_eq!(purged, 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn failed_logins_count_up_until_success(pool: PgPool) {
    let a = agency(&pool).await;
    let user = staff(&pool, a.id, "csr2").await;
    assert_eq!(user.failed_login_count, 0);

    assert_eq!(StaffRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    assert_eq!(StaffRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);

    let until = Utc::now() + Duration::minutes(15);
    StaffRepo::lock_account(&pool, user.id, until).await.unwrap();
    let locked = StaffRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.locked_until.is_some());

    StaffRepo::record_successful_login(&pool, user.id).await.unwrap();
    let reset = StaffRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reset.failed_login_count, 0);
    assert!(reset.locked_until.is_none());
    assert!(reset.last_login_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn progress_writes_roll_back_with_their_transaction(pool: PgPool) {
    let a = agency(&pool).await;
    let assigned = assignment(&pool, a.id, Some(date(2024, 1, 1))).await;
    let l = lesson(&pool, "sales_experience", 1, 1, true).await;
    let key = LearnerKey {
        assignment_id: assigned.id,
        learner_kind: LEARNER_OWNER,
        learner_id: 1,
    };

    let mut tx = pool.begin().await.unwrap();
    let row = ProgressRepo::get_or_create(&mut *tx, key, l.id, LessonStatus::Available)
        .await
        .unwrap();
    QuizAttemptRepo::create(
        &mut *tx,
        &CreateQuizAttempt {
            progress_id: row.id,
            answers: json!({ "q1": 0 }),
            score_percent: 100,
            passed: true,
        },
    )
    .await
    .unwrap();
    ProgressRepo::record_quiz_score(&mut *tx, row.id, 100).await.unwrap();
    tx.rollback().await.unwrap();

    assert!(ProgressRepo::list_for_learner(&pool, key).await.unwrap().is_empty());
    assert!(QuizAttemptRepo::list_for_progress(&pool, row.id)
        .await
        .unwrap()
        .is_empty());
}
