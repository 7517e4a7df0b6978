use std::fmt::Display;

/// Boxed underlying cause carried by [`DataAccessError::Store`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The single error type of the job persistence contract.
///
/// Absence on reads is never reported through this type; lookups return
/// `Ok(None)` instead.
#[derive(Debug, thiserror::Error)]
pub enum DataAccessError {
    /// A new job was saved with a uuid that another job already owns.
    #[error("Duplicate job uuid: {uuid}")]
    DuplicateUuid { uuid: String },

    /// An update targeted an internal id that no longer exists.
    #[error("Job not found: id {id}")]
    NotFound { id: String },

    /// An update tried to change the uuid of a persisted job.
    #[error("Job uuid is immutable: job {id} has uuid {stored}, got {requested}")]
    UuidImmutable {
        id: String,
        stored: String,
        requested: String,
    },

    /// The job does not fit the storage shape (lengths, blank fields).
    #[error("Invalid job data: {0}")]
    Invalid(String),

    /// The underlying store failed (connectivity, transaction, anything else).
    #[error("Store error during {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: BoxError,
    },
}

impl DataAccessError {
    /// Wrap an underlying store failure, tagging it with the operation name.
    pub fn store(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Store {
            operation,
            source: source.into(),
        }
    }

    pub fn not_found(id: &impl Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    pub fn uuid_immutable(id: &impl Display, stored: &str, requested: &str) -> Self {
        Self::UuidImmutable {
            id: id.to_string(),
            stored: stored.to_string(),
            requested: requested.to_string(),
        }
    }
}
