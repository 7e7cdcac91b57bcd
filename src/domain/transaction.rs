use super::money::Money;
use super::worker::WorkerId;
use crate::error::PayrollError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a transaction (UUIDv7 when generated).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TransactionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Amount owed to the worker.
    Due,
    /// Amount paid to the worker.
    Paid,
}

impl FromStr for TransactionType {
    type Err = PayrollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "due" => Ok(Self::Due),
            "paid" => Ok(Self::Paid),
            other => Err(PayrollError::Validation(format!(
                "unknown transaction type '{other}', expected 'due' or 'paid'"
            ))),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Due => f.write_str("due"),
            Self::Paid => f.write_str("paid"),
        }
    }
}

/// Input shape for recording a transaction against a worker.
///
/// Also the row format of transaction CSV imports.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    pub worker_id: WorkerId,
    pub r#type: TransactionType,
    #[serde(deserialize_with = "Money::deserialize_exact")]
    pub amount: Money,
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn new(worker_id: WorkerId, r#type: TransactionType, amount: Money) -> Self {
        Self {
            worker_id,
            r#type,
            amount,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single `due` or `paid` movement attributed to one worker.
///
/// The amount is stored exactly as given; sign and magnitude are not checked.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub worker_id: WorkerId,
    pub r#type: TransactionType,
    pub amount: Money,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Stamps a new id and date onto the input. Worker existence is the caller's concern.
    pub fn create(input: NewTransaction) -> Self {
        Self {
            id: TransactionId::generate(),
            worker_id: input.worker_id,
            r#type: input.r#type,
            amount: input.amount,
            description: input.description,
            date: Utc::now(),
        }
    }
}

/// Orders transactions by `date` descending, ties broken by ascending id.
pub fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
}
