use crate::domain::ports::{TransactionStore, WorkerStore};
use crate::domain::transaction::{Transaction, TransactionId, sort_newest_first};
use crate::domain::worker::{Worker, WorkerId};
use crate::error::{PayrollError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options, WriteBatch};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family for storing worker records.
pub const CF_WORKERS: &str = "workers";
/// Column Family for storing transaction records.
pub const CF_TRANSACTIONS: &str = "transactions";

/// A persistent store implementation using RocksDB.
///
/// Handles storage for both `Worker` and `Transaction` entities using separate
/// Column Families, keyed by id and encoded as JSON. Iteration follows key
/// order, which for UUIDv7 ids is creation order.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`). The
/// database is closed when the last clone is dropped.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    /// Held across every read-then-delete, so a record is reported removed
    /// by exactly one caller.
    deletes: Arc<Mutex<()>>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the required column families ("workers" and "transactions") exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_workers = ColumnFamilyDescriptor::new(CF_WORKERS, Options::default());
        let cf_transactions = ColumnFamilyDescriptor::new(CF_TRANSACTIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_workers, cf_transactions])
            .map_err(PayrollError::storage)?;

        Ok(Self {
            db: Arc::new(db),
            deletes: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| PayrollError::storage(format!("column family '{name}' not found")))
    }

    fn put<T: Serialize>(&self, cf_name: &str, key: &str, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value).map_err(PayrollError::storage)?;
        self.db
            .put_cf(cf, key.as_bytes(), bytes)
            .map_err(PayrollError::storage)
    }

    fn fetch<T: DeserializeOwned>(&self, cf_name: &str, key: &str) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(cf, key.as_bytes()).map_err(PayrollError::storage)? {
            Some(bytes) => Ok(Some(
                serde_json::from_slice(&bytes).map_err(PayrollError::storage)?,
            )),
            None => Ok(None),
        }
    }

    /// Deletes a key, reporting whether it was present.
    async fn delete(&self, cf_name: &str, key: &str) -> Result<bool> {
        let _guard = self.deletes.lock().await;
        let cf = self.cf(cf_name)?;
        let existed = self
            .db
            .get_pinned_cf(cf, key.as_bytes())
            .map_err(PayrollError::storage)?
            .is_some();
        if existed {
            self.db
                .delete_cf(cf, key.as_bytes())
                .map_err(PayrollError::storage)?;
        }
        Ok(existed)
    }

    /// Decodes every record of a column family, in key order.
    fn scan<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item.map_err(PayrollError::storage)?;
            records.push(serde_json::from_slice(&value).map_err(PayrollError::storage)?);
        }

        Ok(records)
    }

    fn newest_transactions<F>(&self, limit: usize, keep: F) -> Result<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        let mut selected: Vec<Transaction> = self
            .scan::<Transaction>(CF_TRANSACTIONS)?
            .into_iter()
            .filter(|tx| keep(tx))
            .collect();
        sort_newest_first(&mut selected);
        selected.truncate(limit);
        Ok(selected)
    }
}

#[async_trait]
impl WorkerStore for RocksDBStore {
    async fn store(&self, worker: Worker) -> Result<()> {
        self.put(CF_WORKERS, worker.id.as_str(), &worker)
    }

    async fn get(&self, id: &WorkerId) -> Result<Option<Worker>> {
        self.fetch(CF_WORKERS, id.as_str())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Worker>> {
        let cf = self.cf(CF_WORKERS)?;
        let mut workers = Vec::new();

        for item in self.db.iterator_cf(cf, IteratorMode::Start).take(limit) {
            let (_key, value) = item.map_err(PayrollError::storage)?;
            workers.push(serde_json::from_slice(&value).map_err(PayrollError::storage)?);
        }

        Ok(workers)
    }

    async fn remove(&self, id: &WorkerId) -> Result<bool> {
        self.delete(CF_WORKERS, id.as_str()).await
    }
}

#[async_trait]
impl TransactionStore for RocksDBStore {
    async fn store(&self, tx: Transaction) -> Result<()> {
        self.put(CF_TRANSACTIONS, tx.id.as_str(), &tx)
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        self.fetch(CF_TRANSACTIONS, id.as_str())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Transaction>> {
        self.newest_transactions(limit, |_| true)
    }

    async fn list_for_worker(
        &self,
        worker_id: &WorkerId,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        self.newest_transactions(limit, |tx| &tx.worker_id == worker_id)
    }

    async fn remove(&self, id: &TransactionId) -> Result<bool> {
        self.delete(CF_TRANSACTIONS, id.as_str()).await
    }

    async fn remove_for_worker(&self, worker_id: &WorkerId) -> Result<usize> {
        let _guard = self.deletes.lock().await;
        let cf = self.cf(CF_TRANSACTIONS)?;
        let mut batch = WriteBatch::default();
        let mut removed = 0;

        for tx in self.scan::<Transaction>(CF_TRANSACTIONS)? {
            if &tx.worker_id == worker_id {
                batch.delete_cf(cf, tx.id.as_str().as_bytes());
                removed += 1;
            }
        }

        // One batch so the sweep of a worker's transactions lands atomically.
        self.db.write(batch).map_err(PayrollError::storage)?;
        Ok(removed)
    }
}
