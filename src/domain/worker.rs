use crate::error::{PayrollError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a worker.
///
/// Generated ids are UUIDv7 strings, so their byte order follows creation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(String);

impl WorkerId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for WorkerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Input shape for registering a worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewWorker {
    pub name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
}

impl NewWorker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            phone: None,
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A person tracked for payroll purposes.
///
/// Records are immutable once created; the only lifecycle event after
/// creation is deletion, which also removes the worker's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Worker {
    /// Builds a new record with a fresh id and creation time.
    ///
    /// Fails if the name is empty or only whitespace.
    pub fn create(input: NewWorker) -> Result<Self> {
        if input.name.trim().is_empty() {
            return Err(PayrollError::Validation(
                "worker name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id: WorkerId::generate(),
            name: input.name,
            position: input.position,
            phone: input.phone,
            created_at: Utc::now(),
        })
    }
}
