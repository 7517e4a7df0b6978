//! Integration tests for the PostgreSQL job adapter.
//!
//! Exercises `PgJobRepo` against a real database:
//! - Lookups by id and uuid, existence checks
//! - Insert, in-place update, delete
//! - uuid unique constraint and uuid immutability
//! - Concurrent inserts racing on one uuid
//!
//! Needs `DATABASE_URL` pointing at a server where sqlx may create test
//! databases; run with `cargo test -p jobstore-db -- --ignored`.

use assert_matches::assert_matches;
use jobstore_core::error::DataAccessError;
use jobstore_core::job::JobData;
use jobstore_core::repository::JobRepository;
use jobstore_core::types::DbId;
use jobstore_db::repositories::PgJobRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_job(uuid: &str) -> JobData<DbId> {
    let mut job = JobData::new(uuid, "nightly-backup", "ops");
    job.group_path = Some("maintenance/db".to_string());
    job.description = Some("dump and ship".to_string());
    job.definition = serde_json::json!({
        "sequence": [{ "exec": "pg_dump --format=custom" }],
        "schedule": { "crontab": "0 0 2 ? * * *" }
    });
    job
}

// ---------------------------------------------------------------------------
// Test: lookups of unknown jobs are absent, not errors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn unknown_job_is_absent(pool: PgPool) {
    let repo = PgJobRepo::new(pool);

    assert!(repo.get(&12345).await.unwrap().is_none());
    assert!(repo.find_by_uuid("never-saved").await.unwrap().is_none());
    assert!(!repo.exists_by_uuid("never-saved").await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: save -> find -> delete -> absent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn save_find_delete_lifecycle(pool: PgPool) {
    let repo = PgJobRepo::new(pool);

    let saved = repo.save(new_job("abc-123")).await.unwrap();
    let id = saved.id.expect("store assigns an id");
    assert_eq!(saved.uuid, "abc-123");
    assert!(saved.created_at.is_some());
    assert!(saved.same_definition(&new_job("abc-123")));

    let found = repo.find_by_uuid("abc-123").await.unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert!(found.same_definition(&saved));
    assert!(repo.exists_by_uuid("abc-123").await.unwrap());

    assert!(repo.delete(&id).await.unwrap());
    assert!(repo.get(&id).await.unwrap().is_none());
    assert!(!repo.exists_by_uuid("abc-123").await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: re-saving a persisted job updates it in place
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn resave_does_not_create_a_second_row(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    let saved = repo.save(new_job("stable")).await.unwrap();

    let mut changed = saved.clone();
    changed.execution_enabled = false;
    changed.definition = serde_json::json!({ "sequence": [] });

    repo.save(changed.clone()).await.unwrap();
    let again = repo.save(changed).await.unwrap();

    assert_eq!(repo.count().await.unwrap(), 1);
    assert_eq!(again.id, saved.id);
    assert_eq!(again.created_at, saved.created_at);

    let stored = repo.get(&saved.id.unwrap()).await.unwrap().unwrap();
    assert!(!stored.execution_enabled);
    assert_eq!(stored.definition, serde_json::json!({ "sequence": [] }));
}

// ---------------------------------------------------------------------------
// Test: unique constraint on uuid
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn duplicate_uuid_is_rejected(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    let first = repo.save(new_job("dup")).await.unwrap();

    let result = repo.save(new_job("dup")).await;
    assert_matches!(result, Err(DataAccessError::DuplicateUuid { ref uuid }) if uuid == "dup");

    let stored = repo.get(&first.id.unwrap()).await.unwrap().unwrap();
    assert_eq!(stored, first);
    assert_eq!(repo.count().await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: update of a vanished row and uuid immutability
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn update_of_deleted_job_fails(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    let saved = repo.save(new_job("gone")).await.unwrap();
    repo.delete(&saved.id.unwrap()).await.unwrap();

    let result = repo.save(saved).await;
    assert_matches!(result, Err(DataAccessError::NotFound { .. }));
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn update_cannot_change_uuid(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    let saved = repo.save(new_job("fixed")).await.unwrap();

    let mut moved = saved.clone();
    moved.uuid = "moved".to_string();
    let result = repo.save(moved).await;

    assert_matches!(
        result,
        Err(DataAccessError::UuidImmutable { ref stored, ref requested, .. })
            if stored == "fixed" && requested == "moved"
    );
    assert!(!repo.exists_by_uuid("moved").await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: delete of an absent id is a silent success
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn deleting_absent_job_returns_false(pool: PgPool) {
    let repo = PgJobRepo::new(pool);
    let saved = repo.save(new_job("keep")).await.unwrap();

    assert!(!repo.delete(&(saved.id.unwrap() + 1000)).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: concurrent inserts of one uuid
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn concurrent_inserts_admit_exactly_one(pool: PgPool) {
    let repo = PgJobRepo::new(pool);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.save(new_job("race")).await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(DataAccessError::DuplicateUuid { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Test: schema bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn health_check_passes_after_migrations(pool: PgPool) {
    jobstore_db::health_check(&pool).await.unwrap();
    let repo = PgJobRepo::new(pool);
    repo.health_check().await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
}
