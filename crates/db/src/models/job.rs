//! Row model for the `jobs` table.

use jobstore_core::job::JobData;
use jobstore_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: DbId,
    pub uuid: String,
    pub name: String,
    pub project: String,
    pub group_path: Option<String>,
    pub description: Option<String>,
    pub schedule_enabled: bool,
    pub execution_enabled: bool,
    pub definition: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<JobRow> for JobData<DbId> {
    fn from(row: JobRow) -> Self {
        Self {
            id: Some(row.id),
            uuid: row.uuid,
            name: row.name,
            project: row.project,
            group_path: row.group_path,
            description: row.description,
            schedule_enabled: row.schedule_enabled,
            execution_enabled: row.execution_enabled,
            definition: row.definition,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}
