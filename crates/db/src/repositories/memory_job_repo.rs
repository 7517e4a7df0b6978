//! In-process adapter.
//!
//! All writes run under one write guard, which is the serialization point
//! for the uuid check-then-insert. Records are replaced whole, so readers
//! never see a half-written job.

use std::collections::HashMap;

use async_trait::async_trait;
use jobstore_core::error::DataAccessError;
use jobstore_core::job::{normalize_uuid, JobData};
use jobstore_core::repository::JobRepository;
use jobstore_core::types::DbId;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Store {
    rows: HashMap<DbId, JobData<DbId>>,
    /// uuid -> id; kept in lockstep with `rows`.
    uuid_index: HashMap<String, DbId>,
    next_id: DbId,
}

/// Job repository held entirely in memory. Ids start at 1.
#[derive(Debug)]
pub struct InMemoryJobRepo {
    store: RwLock<Store>,
}

impl Default for InMemoryJobRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryJobRepo {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Store {
                rows: HashMap::new(),
                uuid_index: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepo {
    type Id = DbId;

    async fn get(&self, id: &DbId) -> Result<Option<JobData<DbId>>, DataAccessError> {
        let store = self.store.read().await;
        Ok(store.rows.get(id).cloned())
    }

    async fn find_by_uuid(&self, uuid: &str) -> Result<Option<JobData<DbId>>, DataAccessError> {
        let store = self.store.read().await;
        Ok(store
            .uuid_index
            .get(normalize_uuid(uuid))
            .and_then(|id| store.rows.get(id))
            .cloned())
    }

    async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, DataAccessError> {
        let store = self.store.read().await;
        Ok(store.uuid_index.contains_key(normalize_uuid(uuid)))
    }

    async fn save(&self, data: JobData<DbId>) -> Result<JobData<DbId>, DataAccessError> {
        let mut data = data.normalized()?;
        let now = chrono::Utc::now();
        let mut store = self.store.write().await;

        match data.id {
            None => {
                if store.uuid_index.contains_key(&data.uuid) {
                    tracing::warn!(uuid = %data.uuid, "Rejected duplicate job uuid");
                    return Err(DataAccessError::DuplicateUuid { uuid: data.uuid });
                }

                let id = store.next_id;
                store.next_id += 1;

                data.id = Some(id);
                data.created_at = Some(now);
                data.updated_at = Some(now);

                store.uuid_index.insert(data.uuid.clone(), id);
                store.rows.insert(id, data.clone());
                tracing::info!(job_id = id, uuid = %data.uuid, "Job created");
                Ok(data)
            }
            Some(id) => {
                let existing = store.rows.get(&id).ok_or_else(|| {
                    tracing::warn!(job_id = id, "Update targeted a missing job");
                    DataAccessError::not_found(&id)
                })?;

                if existing.uuid != data.uuid {
                    tracing::warn!(job_id = id, stored = %existing.uuid, requested = %data.uuid, "Rejected uuid change");
                    return Err(DataAccessError::uuid_immutable(&id, &existing.uuid, &data.uuid));
                }

                data.created_at = existing.created_at;
                data.updated_at = Some(now);

                store.rows.insert(id, data.clone());
                tracing::info!(job_id = id, uuid = %data.uuid, "Job updated");
                Ok(data)
            }
        }
    }

    async fn delete(&self, id: &DbId) -> Result<bool, DataAccessError> {
        let mut store = self.store.write().await;
        match store.rows.remove(id) {
            Some(removed) => {
                store.uuid_index.remove(&removed.uuid);
                tracing::info!(job_id = id, uuid = %removed.uuid, "Job deleted");
                Ok(true)
            }
            None => {
                tracing::debug!(job_id = id, "Delete of absent job ignored");
                Ok(false)
            }
        }
    }

    async fn count(&self) -> Result<i64, DataAccessError> {
        let store = self.store.read().await;
        Ok(store.rows.len() as i64)
    }

    async fn health_check(&self) -> Result<(), DataAccessError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
