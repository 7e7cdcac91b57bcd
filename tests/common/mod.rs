#![allow(dead_code)]

use async_trait::async_trait;
use paybook::application::ledger::PayrollLedger;
use paybook::domain::ports::TransactionStore;
use paybook::domain::transaction::{Transaction, TransactionId};
use paybook::domain::worker::WorkerId;
use paybook::error::{PayrollError, Result};
use paybook::infrastructure::in_memory::{InMemoryTransactionStore, InMemoryWorkerStore};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn in_memory_ledger() -> PayrollLedger {
    PayrollLedger::new(
        Box::new(InMemoryWorkerStore::new()),
        Box::new(InMemoryTransactionStore::new()),
    )
}

/// Writes a transaction import file with the standard header.
pub fn import_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "worker_id,type,amount,description").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// A transaction store whose backend is unreachable.
pub struct OfflineTransactionStore;

fn offline<T>() -> Result<T> {
    Err(PayrollError::storage("transaction store offline"))
}

#[async_trait]
impl TransactionStore for OfflineTransactionStore {
    async fn store(&self, _tx: Transaction) -> Result<()> {
        offline()
    }

    async fn get(&self, _id: &TransactionId) -> Result<Option<Transaction>> {
        offline()
    }

    async fn list(&self, _limit: usize) -> Result<Vec<Transaction>> {
        offline()
    }

    async fn list_for_worker(
        &self,
        _worker_id: &WorkerId,
        _limit: usize,
    ) -> Result<Vec<Transaction>> {
        offline()
    }

    async fn remove(&self, _id: &TransactionId) -> Result<bool> {
        offline()
    }

    async fn remove_for_worker(&self, _worker_id: &WorkerId) -> Result<usize> {
        offline()
    }
}
