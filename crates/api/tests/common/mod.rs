#![allow(dead_code)]

use std::sync::Arc;

use agencybrain_api::auth::jwt::{generate_access_token, JwtConfig, DEFAULT_AUDIENCE};
use agencybrain_api::auth::password::hash_password;
use agencybrain_api::config::ServerConfig;
use agencybrain_api::router::build_app_router;
use agencybrain_api::state::AppState;
use agencybrain_core::status::AssignmentStatus;
use agencybrain_db::models::agency::{Agency, CreateAgency};
use agencybrain_db::models::assignment::{Assignment, CreateAssignment};
use agencybrain_db::models::curriculum::{CreateLesson, CreateModule, Lesson};
use agencybrain_db::models::profile::{CreateProfile, Profile};
use agencybrain_db::models::staff::{CreateStaffUser, StaffUser};
use agencybrain_db::repositories::{
    AgencyRepo, AssignmentRepo, CurriculumRepo, ProfileRepo, StaffRepo,
};
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-hosted-auth-secret-long-enough";
pub const STAFF_PASSWORD: &str = "front-desk-2024";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
        staff_session_ttl_hours: 24,
        quiz_pass_percent: 70,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a status and return the parsed body.
pub async fn expect_status(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn seed_agency(pool: &PgPool, timezone: &str) -> Agency {
    AgencyRepo::create(
        pool,
        &CreateAgency {
            name: "Summit Insurance Group".to_string(),
            timezone: timezone.to_string(),
        },
    )
    .await
    .expect("agency creation should succeed")
}

/// Create a profile and mint a hosted-auth token for it.
pub async fn seed_owner(pool: &PgPool, agency_id: i64, role: &str) -> (Profile, String) {
    let auth_user_id = Uuid::new_v4();
    let profile = ProfileRepo::create(
        pool,
        &CreateProfile {
            auth_user_id,
            agency_id,
            full_name: "Jordan Owner".to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("profile creation should succeed");

    let token = generate_access_token(auth_user_id, None, 3600, &test_config().jwt)
        .expect("token generation should succeed");
    (profile, token)
}

pub async fn seed_staff(pool: &PgPool, agency_id: i64, username: &str) -> StaffUser {
    StaffRepo::create(
        pool,
        &CreateStaffUser {
            agency_id,
            username: username.to_string(),
            password_hash: hash_password(STAFF_PASSWORD).expect("hashing should succeed"),
            display_name: format!("Staff {username}"),
        },
    )
    .await
    .expect("staff creation should succeed")
}

/// Log in through the API and return the session token.
pub async fn login_staff(app: Router, username: &str) -> String {
    let body = json!({ "username": username, "password": STAFF_PASSWORD });
    let json = expect_status(post_json(app, "/api/v1/staff/login", body).await, StatusCode::OK).await;
    json["data"]["token"].as_str().unwrap().to_string()
}

/// Create an assignment and walk it to `status`.
pub async fn seed_assignment(
    pool: &PgPool,
    agency_id: i64,
    program: &str,
    start_date: Option<NaiveDate>,
    status: AssignmentStatus,
) -> Assignment {
    let mut assignment = AssignmentRepo::create(
        pool,
        &CreateAssignment {
            agency_id,
            program: program.to_string(),
            start_date,
        },
    )
    .await
    .expect("assignment creation should succeed");

    let path: &[(AssignmentStatus, AssignmentStatus)] = match status {
        AssignmentStatus::Pending => &[],
        AssignmentStatus::Active => &[(AssignmentStatus::Pending, AssignmentStatus::Active)],
        AssignmentStatus::Completed => &[
            (AssignmentStatus::Pending, AssignmentStatus::Active),
            (AssignmentStatus::Active, AssignmentStatus::Completed),
        ],
    };
    for (from, to) in path {
        assignment = AssignmentRepo::transition(pool, assignment.id, *from, *to)
            .await
            .unwrap()
            .expect("transition should apply");
    }
    assignment
}

/// Seeded lessons, keyed by slot.
pub struct Curriculum {
    /// Week 1, Monday. Staff visible, carries a three-question quiz.
    pub week1_mon: Lesson,
    /// Week 1, Wednesday. Owner only.
    pub week1_wed: Lesson,
    /// Week 1, Friday. Staff visible.
    pub week1_fri: Lesson,
    /// Week 2, Monday. Staff visible.
    pub week2_mon: Lesson,
}

pub fn sample_quiz() -> Value {
    json!([
        { "id": "q1", "prompt": "Best time to call?", "options": ["Morning", "Never"], "correct_index": 0 },
        { "id": "q2", "prompt": "Bundle what?", "options": ["Auto", "Home", "Both"], "correct_index": 2 },
        { "id": "q3", "prompt": "Follow up within?", "options": ["24h", "1 month"], "correct_index": 0 },
    ])
}

/// Seed two weeks of curriculum for `program`.
pub async fn seed_curriculum(pool: &PgPool, program: &str) -> Curriculum {
    let mut modules = Vec::new();
    for week in 1..=2 {
        let module = CurriculumRepo::create_module(
            pool,
            &CreateModule {
                program: program.to_string(),
                week_number: week,
                title: format!("Week {week}"),
                description: None,
            },
        )
        .await
        .expect("module creation should succeed");
        modules.push(module);
    }

    let lesson = |module_id: i64, day: i16, title: &str, staff_visible: bool, quiz: Value| {
        CreateLesson {
            module_id,
            day_of_week: day,
            title: title.to_string(),
            content: format!("{title} content"),
            staff_visible,
            quiz_questions: quiz,
        }
    };

    let w1 = modules[0].id;
    let w2 = modules[1].id;
    let inputs = [
        lesson(w1, 1, "Opening the call", true, sample_quiz()),
        lesson(w1, 3, "Owner pipeline review", false, json!([])),
        lesson(w1, 5, "Asking for referrals", true, json!([])),
        lesson(w2, 1, "Bundling conversations", true, json!([])),
    ];

    let mut created = Vec::new();
    for input in &inputs {
        created.push(
            CurriculumRepo::create_lesson(pool, input)
                .await
                .expect("lesson creation should succeed"),
        );
    }
    let mut it = created.into_iter();
    Curriculum {
        week1_mon: it.next().unwrap(),
        week1_wed: it.next().unwrap(),
        week1_fri: it.next().unwrap(),
        week2_mon: it.next().unwrap(),
    }
}

/// Find a lesson in a program overview response by id.
pub fn find_lesson(overview: &Value, lesson_id: i64) -> Option<&Value> {
    overview["data"]["modules"]
        .as_array()?
        .iter()
        .flat_map(|m| m["lessons"].as_array().into_iter().flatten())
        .find(|l| l["id"] == lesson_id)
}
