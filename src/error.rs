use crate::domain::transaction::TransactionId;
use crate::domain::worker::WorkerId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PayrollError>;

#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("worker not found: {0}")]
    WorkerNotFound(WorkerId),
    #[error("transaction not found: {0}")]
    TransactionNotFound(TransactionId),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage unavailable: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayrollError {
    /// Wraps a backend failure into the generic storage condition.
    pub fn storage<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Storage(err.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkerNotFound(_) | Self::TransactionNotFound(_)
        )
    }
}
