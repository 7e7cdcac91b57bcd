use super::transaction::{Transaction, TransactionId};
use super::worker::{Worker, WorkerId};
use crate::error::Result;
use async_trait::async_trait;

/// Upper bound on the number of records any listing returns.
pub const FETCH_LIMIT: usize = 1000;

#[async_trait]
pub trait WorkerStore: Send + Sync {
    async fn store(&self, worker: Worker) -> Result<()>;
    async fn get(&self, id: &WorkerId) -> Result<Option<Worker>>;
    /// Returns at most `limit` workers in store key order.
    async fn list(&self, limit: usize) -> Result<Vec<Worker>>;
    /// Returns `false` if no worker had this id.
    async fn remove(&self, id: &WorkerId) -> Result<bool>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn store(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>>;
    /// Returns the `limit` newest transactions, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<Transaction>>;
    /// Same ordering and cap as `list`, restricted to one worker.
    async fn list_for_worker(&self, worker_id: &WorkerId, limit: usize)
    -> Result<Vec<Transaction>>;
    /// Returns `false` if no transaction had this id.
    async fn remove(&self, id: &TransactionId) -> Result<bool>;
    /// Removes every transaction of the worker and returns how many were removed.
    async fn remove_for_worker(&self, worker_id: &WorkerId) -> Result<usize>;
}

pub type WorkerStoreBox = Box<dyn WorkerStore>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;
