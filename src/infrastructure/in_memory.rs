use crate::domain::ports::{TransactionStore, WorkerStore};
use crate::domain::transaction::{Transaction, TransactionId, sort_newest_first};
use crate::domain::worker::{Worker, WorkerId};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for workers.
///
/// Uses `Arc<RwLock<BTreeMap<WorkerId, Worker>>>` so that listing follows id
/// order, the same order the RocksDB backend iterates in.
#[derive(Default, Clone)]
pub struct InMemoryWorkerStore {
    workers: Arc<RwLock<BTreeMap<WorkerId, Worker>>>,
}

impl InMemoryWorkerStore {
    /// Creates a new, empty in-memory worker store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkerStore for InMemoryWorkerStore {
    async fn store(&self, worker: Worker) -> Result<()> {
        let mut workers = self.workers.write().await;
        workers.insert(worker.id.clone(), worker);
        Ok(())
    }

    async fn get(&self, id: &WorkerId) -> Result<Option<Worker>> {
        let workers = self.workers.read().await;
        Ok(workers.get(id).cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Worker>> {
        let workers = self.workers.read().await;
        Ok(workers.values().take(limit).cloned().collect())
    }

    async fn remove(&self, id: &WorkerId) -> Result<bool> {
        let mut workers = self.workers.write().await;
        Ok(workers.remove(id).is_some())
    }
}

/// A thread-safe in-memory store for transactions.
///
/// Listings scan the whole map, then sort newest first and truncate.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<BTreeMap<TransactionId, Transaction>>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_where<F>(&self, limit: usize, keep: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        let transactions = self.transactions.read().await;
        let mut selected: Vec<Transaction> =
            transactions.values().filter(|tx| keep(tx)).cloned().collect();
        drop(transactions);

        sort_newest_first(&mut selected);
        selected.truncate(limit);
        selected
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn store(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(tx.id.clone(), tx);
        Ok(())
    }

    async fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.get(id).cloned())
    }

    async fn list(&self, limit: usize) -> Result<Vec<Transaction>> {
        Ok(self.collect_where(limit, |_| true).await)
    }

    async fn list_for_worker(
        &self,
        worker_id: &WorkerId,
        limit: usize,
    ) -> Result<Vec<Transaction>> {
        Ok(self
            .collect_where(limit, |tx| &tx.worker_id == worker_id)
            .await)
    }

    async fn remove(&self, id: &TransactionId) -> Result<bool> {
        let mut transactions = self.transactions.write().await;
        Ok(transactions.remove(id).is_some())
    }

    async fn remove_for_worker(&self, worker_id: &WorkerId) -> Result<usize> {
        let mut transactions = self.transactions.write().await;
        let before = transactions.len();
        transactions.retain(|_, tx| &tx.worker_id != worker_id);
        Ok(before - transactions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::ports::FETCH_LIMIT;
    use crate::domain::transaction::{NewTransaction, TransactionType};
    use crate::domain::worker::NewWorker;
    use rust_decimal_macros::dec;

    fn tx(worker_id: &WorkerId, amount: Money) -> Transaction {
        Transaction::create(NewTransaction::new(
            worker_id.clone(),
            TransactionType::Due,
            amount,
        ))
    }

    #[tokio::test]
    async fn test_in_memory_worker_store() {
        let store = InMemoryWorkerStore::new();
        let worker = Worker::create(NewWorker::new("Jean")).unwrap();

        store.store(worker.clone()).await.unwrap();
        let retrieved = store.get(&worker.id).await.unwrap().unwrap();
        assert_eq!(retrieved, worker);

        assert!(store.get(&WorkerId::from("missing")).await.unwrap().is_none());

        assert!(store.remove(&worker.id).await.unwrap());
        assert!(!store.remove(&worker.id).await.unwrap());
        assert!(store.get(&worker.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_worker_store_list_respects_limit() {
        let store = InMemoryWorkerStore::new();
        for i in 0..5 {
            let worker = Worker::create(NewWorker::new(format!("W{i}"))).unwrap();
            store.store(worker).await.unwrap();
        }

        assert_eq!(store.list(FETCH_LIMIT).await.unwrap().len(), 5);
        assert_eq!(store.list(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_in_memory_transaction_store() {
        let store = InMemoryTransactionStore::new();
        let worker_id = WorkerId::from("w1");
        let tx = tx(&worker_id, Money::new(dec!(100.0)));

        store.store(tx.clone()).await.unwrap();
        let retrieved = store.get(&tx.id).await.unwrap().unwrap();
        assert_eq!(retrieved, tx);

        assert!(store.remove(&tx.id).await.unwrap());
        assert!(!store.remove(&tx.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_transaction_store_filters_by_worker() {
        let store = InMemoryTransactionStore::new();
        let w1 = WorkerId::from("w1");
        let w2 = WorkerId::from("w2");

        store.store(tx(&w1, Money::new(dec!(1)))).await.unwrap();
        store.store(tx(&w2, Money::new(dec!(2)))).await.unwrap();
        store.store(tx(&w1, Money::new(dec!(3)))).await.unwrap();

        let for_w1 = store.list_for_worker(&w1, FETCH_LIMIT).await.unwrap();
        assert_eq!(for_w1.len(), 2);
        assert!(for_w1.iter().all(|t| t.worker_id == w1));

        let unknown = store
            .list_for_worker(&WorkerId::from("nobody"), FETCH_LIMIT)
            .await
            .unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_in_memory_transaction_store_newest_first() {
        let store = InMemoryTransactionStore::new();
        let w1 = WorkerId::from("w1");
        for i in 0..4_i64 {
            store.store(tx(&w1, Money::new(i.into()))).await.unwrap();
        }

        let all = store.list(FETCH_LIMIT).await.unwrap();
        assert!(all.windows(2).all(|pair| pair[0].date >= pair[1].date));

        let capped = store.list(2).await.unwrap();
        assert_eq!(capped, all[..2].to_vec());
    }

    #[tokio::test]
    async fn test_in_memory_remove_for_worker() {
        let store = InMemoryTransactionStore::new();
        let w1 = WorkerId::from("w1");
        let w2 = WorkerId::from("w2");

        store.store(tx(&w1, Money::new(dec!(1)))).await.unwrap();
        store.store(tx(&w1, Money::new(dec!(2)))).await.unwrap();
        let kept = tx(&w2, Money::new(dec!(3)));
        store.store(kept.clone()).await.unwrap();

        assert_eq!(store.remove_for_worker(&w1).await.unwrap(), 2);
        assert_eq!(store.remove_for_worker(&w1).await.unwrap(), 0);
        assert_eq!(store.list(FETCH_LIMIT).await.unwrap(), vec![kept]);
    }
}
