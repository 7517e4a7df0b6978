//! PostgreSQL adapter for the `jobs` table.
//!
//! uuid uniqueness is enforced by the `uq_jobs_uuid` constraint, so two
//! concurrent inserts of the same uuid can never both commit.

use async_trait::async_trait;
use jobstore_core::error::DataAccessError;
use jobstore_core::job::{normalize_uuid, JobData};
use jobstore_core::repository::JobRepository;
use jobstore_core::types::DbId;
use sqlx::PgPool;

use crate::models::job::JobRow;

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, uuid, name, project, group_path, description, \
    schedule_enabled, execution_enabled, definition, \
    created_at, updated_at";

/// Unique constraint backing uuid lookups.
const UUID_CONSTRAINT: &str = "uq_jobs_uuid";

/// PostgreSQL SQLSTATE for unique violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Job repository backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgJobRepo {
    pool: PgPool,
}

impl PgJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn insert(&self, data: JobData<DbId>) -> Result<JobData<DbId>, DataAccessError> {
        let query = format!(
            "INSERT INTO jobs \
                 (uuid, name, project, group_path, description, \
                  schedule_enabled, execution_enabled, definition) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(&data.uuid)
            .bind(&data.name)
            .bind(&data.project)
            .bind(&data.group_path)
            .bind(&data.description)
            .bind(data.schedule_enabled)
            .bind(data.execution_enabled)
            .bind(&data.definition)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_write_error("save", e, &data.uuid))?;

        tracing::info!(job_id = row.id, uuid = %row.uuid, "Job created");
        Ok(row.into())
    }

    /// Overwrite every domain column of the row matching both id and uuid.
    ///
    /// When nothing matches, a follow-up read tells a vanished row apart
    /// from an attempted uuid change.
    async fn update(&self, id: DbId, data: JobData<DbId>) -> Result<JobData<DbId>, DataAccessError> {
        let query = format!(
            "UPDATE jobs SET \
                 name = $3, project = $4, group_path = $5, description = $6, \
                 schedule_enabled = $7, execution_enabled = $8, definition = $9, \
                 updated_at = NOW() \
             WHERE id = $1 AND uuid = $2 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .bind(&data.uuid)
            .bind(&data.name)
            .bind(&data.project)
            .bind(&data.group_path)
            .bind(&data.description)
            .bind(data.schedule_enabled)
            .bind(data.execution_enabled)
            .bind(&data.definition)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify_write_error("save", e, &data.uuid))?;

        if let Some(row) = updated {
            tracing::info!(job_id = row.id, uuid = %row.uuid, "Job updated");
            return Ok(row.into());
        }

        let stored: Option<String> = sqlx::query_scalar("SELECT uuid FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("save", e))?;

        match stored {
            None => {
                tracing::warn!(job_id = id, "Update targeted a missing job");
                Err(DataAccessError::not_found(&id))
            }
            Some(stored) => {
                tracing::warn!(job_id = id, %stored, requested = %data.uuid, "Rejected uuid change");
                Err(DataAccessError::uuid_immutable(&id, &stored, &data.uuid))
            }
        }
    }
}

#[async_trait]
impl JobRepository for PgJobRepo {
    type Id = DbId;

    async fn get(&self, id: &DbId) -> Result<Option<JobData<DbId>>, DataAccessError> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("get", e))?;
        tracing::debug!(job_id = id, found = row.is_some(), "Job lookup by id");
        Ok(row.map(Into::into))
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<JobData<DbId>>, DataAccessError> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE uuid = $1");
        let row = sqlx::query_as::<_, JobRow>(&query)
            .bind(normalize_uuid(uuid))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("find_by_uuid", e))?;
        tracing::debug!(uuid, found = row.is_some(), "Job lookup by uuid");
        Ok(row.map(Into::into))
    }

    async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, DataAccessError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM jobs WHERE uuid = $1)")
            .bind(normalize_uuid(uuid))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("exists_by_uuid", e))
    }

    async fn save(&self, data: JobData<DbId>) -> Result<JobData<DbId>, DataAccessError> {
        let data = data.normalized()?;
        match data.id {
            None => self.insert(data).await,
            Some(id) => self.update(id, data).await,
        }
    }

    async fn delete(&self, id: &DbId) -> Result<bool, DataAccessError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("delete", e))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(job_id = id, "Job deleted");
        } else {
            tracing::debug!(job_id = id, "Delete of absent job ignored");
        }
        Ok(deleted)
    }

    async fn count(&self) -> Result<i64, DataAccessError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("count", e))
    }

    async fn health_check(&self) -> Result<(), DataAccessError> {
        crate::health_check(&self.pool)
            .await
            .map_err(|e| DataAccessError::store("health_check", e))
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

/// Map a write failure to the contract's error type.
///
/// A unique violation on `uq_jobs_uuid` becomes `DuplicateUuid`; everything
/// else is a store failure carrying the sqlx error.
fn classify_write_error(operation: &'static str, err: sqlx::Error, uuid: &str) -> DataAccessError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(UUID_CONSTRAINT)
        {
            tracing::warn!(uuid, "Rejected duplicate job uuid");
            return DataAccessError::DuplicateUuid {
                uuid: uuid.to_string(),
            };
        }
    }
    DataAccessError::store(operation, err)
}
