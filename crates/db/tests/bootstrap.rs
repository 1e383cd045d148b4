use agencybrain_core::status::{AssignmentStatus, LessonStatus};
use sqlx::PgPool;

/// Connect, migrate, and verify the lookup tables match the core enums.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    agencybrain_db::health_check(&pool).await.unwrap();

    let rows: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM assignment_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    for (id, name) in &rows {
        assert_eq!(AssignmentStatus::from_id(*id).unwrap().name(), name);
    }
    assert_eq!(rows.len(), 3);

    let rows: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM lesson_progress_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    for (id, name) in &rows {
        assert_eq!(LessonStatus::from_id(*id).unwrap().name(), name);
    }
    assert_eq!(rows.len(), 4);
}

/// Every unique constraint is named `uq_*` so the API can map violations to 409.
#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as(
        "SELECT conname::text FROM pg_constraint
         WHERE contype = 'u' AND connamespace = 'public'::regnamespace",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!names.is_empty());
    for (name,) in &names {
        assert!(name.starts_with("uq_"), "constraint {name} should start with uq_");
    }
}
