//! Storage-agnostic Job persistence capability.
//!
//! Callers hold an `Arc<dyn JobRepository<Id = ...>>` and never name the
//! concrete adapter. Lookups return `Ok(None)` on absence; every failure of
//! the underlying store surfaces as a [`DataAccessError`].

use std::fmt::{Debug, Display};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DataAccessError;
use crate::job::JobData;

/// CRUD access to Job records addressed by internal id or by uuid.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// The store's native key type.
    type Id: Clone + Debug + Display + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Fetch a job by internal id.
    async fn get(&self, id: &Self::Id) -> Result<Option<JobData<Self::Id>>, DataAccessError>;

    /// Fetch a job by uuid through the store's unique uuid index.
    async fn find_by_uuid(&self, uuid: &str)
        -> Result<Option<JobData<Self::Id>>, DataAccessError>;

    /// Whether a job with this uuid exists, without loading it.
    async fn exists_by_uuid(&self, uuid: &str) -> Result<bool, DataAccessError>;

    /// Insert a new job (`id == None`) or overwrite the job with `data.id`.
    ///
    /// Returns the record as persisted, with id and timestamps populated.
    ///
    /// # Errors
    ///
    /// - [`DataAccessError::DuplicateUuid`] when inserting a uuid that is taken.
    /// - [`DataAccessError::NotFound`] when updating an id that no longer exists.
    /// - [`DataAccessError::UuidImmutable`] when an update changes the uuid.
    /// - [`DataAccessError::Invalid`] when the job does not fit the storage shape.
    /// - [`DataAccessError::Store`] on any store failure.
    async fn save(&self, data: JobData<Self::Id>) -> Result<JobData<Self::Id>, DataAccessError>;

    /// Remove the job with this id.
    ///
    /// Deleting an id that is not stored succeeds and returns `false`;
    /// `true` means a record was removed.
    async fn delete(&self, id: &Self::Id) -> Result<bool, DataAccessError>;

    /// Number of stored jobs.
    async fn count(&self) -> Result<i64, DataAccessError>;

    /// Cheap round-trip proving the store is reachable.
    async fn health_check(&self) -> Result<(), DataAccessError>;

    /// Short name of the storage engine, for diagnostics.
    fn backend(&self) -> &'static str;
}
