//! The Job entity as the repository stores it.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DataAccessError;
use crate::types::{DbId, Timestamp};

/// One Job definition.
///
/// `id` is `None` while the job is transient and is assigned by the store on
/// the first successful save. `uuid` is the externally stable identifier and
/// never changes once persisted. Everything past `uuid` is opaque to the
/// repository and is stored and returned as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct JobData<Id = DbId> {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub uuid: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub project: String,
    #[serde(default)]
    #[validate(length(max = 1024))]
    pub group_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "enabled")]
    pub schedule_enabled: bool,
    #[serde(default = "enabled")]
    pub execution_enabled: bool,
    /// Workflow, options, schedule and notifications, kept as one document.
    #[serde(default = "empty_definition")]
    pub definition: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

fn enabled() -> bool {
    true
}

fn empty_definition() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl<Id> JobData<Id> {
    /// A transient job with the given uuid. Pass an empty uuid to have one
    /// generated on save.
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid: uuid.into(),
            name: name.into(),
            project: project.into(),
            group_path: None,
            description: None,
            schedule_enabled: true,
            execution_enabled: true,
            definition: empty_definition(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Compare everything except the store-assigned id and timestamps.
    pub fn same_definition<Other>(&self, other: &JobData<Other>) -> bool {
        self.uuid == other.uuid
            && self.name == other.name
            && self.project == other.project
            && self.group_path == other.group_path
            && self.description == other.description
            && self.schedule_enabled == other.schedule_enabled
            && self.execution_enabled == other.execution_enabled
            && self.definition == other.definition
    }

    /// Apply the store-side normalization every adapter performs before
    /// writing.
    ///
    /// Trims the uuid, generates a v4 uuid for a new job whose uuid is blank,
    /// then checks the storage shape.
    pub fn normalized(mut self) -> Result<Self, DataAccessError> {
        let trimmed = normalize_uuid(&self.uuid);
        if trimmed.len() != self.uuid.len() {
            self.uuid = trimmed.to_string();
        }

        if self.uuid.is_empty() {
            if !self.is_new() {
                return Err(DataAccessError::Invalid(
                    "uuid must not be blank for a persisted job".to_string(),
                ));
            }
            self.uuid = uuid::Uuid::new_v4().to_string();
        }

        if self.uuid.chars().any(char::is_whitespace) {
            return Err(DataAccessError::Invalid(format!(
                "uuid must not contain whitespace: {:?}",
                self.uuid
            )));
        }

        self.validate()
            .map_err(|errors| DataAccessError::Invalid(errors.to_string()))?;

        Ok(self)
    }
}

/// Canonical form of a uuid used for both writes and lookups.
pub fn normalize_uuid(uuid: &str) -> &str {
    uuid.trim()
}
