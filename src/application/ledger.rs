use crate::domain::balance::WorkerBalance;
use crate::domain::ports::{FETCH_LIMIT, TransactionStoreBox, WorkerStoreBox};
use crate::domain::transaction::{NewTransaction, Transaction, TransactionId};
use crate::domain::worker::{NewWorker, Worker, WorkerId};
use crate::error::{PayrollError, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The entry point for every payroll operation.
///
/// `PayrollLedger` owns both storage backends and enforces the integrity rules
/// that span them: transactions may only be recorded for an existing worker,
/// and deleting a worker deletes all of its transactions.
///
/// Balances are never stored. Each read recomputes them from the transactions
/// visible at that moment, without snapshot isolation across workers.
pub struct PayrollLedger {
    workers: WorkerStoreBox,
    transactions: TransactionStoreBox,
    /// Shared by transaction creation, held exclusively by the worker cascade,
    /// so a transaction cannot be recorded between a worker's removal and the
    /// sweep of its transactions.
    integrity: RwLock<()>,
}

impl PayrollLedger {
    /// Creates a new `PayrollLedger` instance.
    ///
    /// # Arguments
    ///
    /// * `workers` - The store for worker records.
    /// * `transactions` - The store for the transaction log.
    pub fn new(workers: WorkerStoreBox, transactions: TransactionStoreBox) -> Self {
        Self {
            workers,
            transactions,
            integrity: RwLock::new(()),
        }
    }

    pub async fn create_worker(&self, input: NewWorker) -> Result<Worker> {
        let worker = Worker::create(input)?;
        self.workers.store(worker.clone()).await?;
        info!(worker_id = %worker.id, name = %worker.name, "worker created");
        Ok(worker)
    }

    pub async fn list_workers(&self) -> Result<Vec<Worker>> {
        let workers = self.workers.list(FETCH_LIMIT).await?;
        debug!(count = workers.len(), "listed workers");
        Ok(workers)
    }

    pub async fn get_worker(&self, id: &WorkerId) -> Result<Worker> {
        self.workers
            .get(id)
            .await?
            .ok_or_else(|| PayrollError::WorkerNotFound(id.clone()))
    }

    /// Deletes a worker and every transaction recorded against it.
    ///
    /// Returns the number of transactions removed with the worker. If the
    /// worker does not exist nothing is touched.
    pub async fn delete_worker(&self, id: &WorkerId) -> Result<usize> {
        let _gate = self.integrity.write().await;

        if !self.workers.remove(id).await? {
            return Err(PayrollError::WorkerNotFound(id.clone()));
        }
        let removed = self.transactions.remove_for_worker(id).await?;

        info!(worker_id = %id, transactions = removed, "worker deleted");
        Ok(removed)
    }

    /// Records a transaction after checking that its worker exists.
    pub async fn create_transaction(&self, input: NewTransaction) -> Result<Transaction> {
        let _gate = self.integrity.read().await;

        if self.workers.get(&input.worker_id).await?.is_none() {
            return Err(PayrollError::WorkerNotFound(input.worker_id));
        }

        let tx = Transaction::create(input);
        self.transactions.store(tx.clone()).await?;
        info!(
            transaction_id = %tx.id,
            worker_id = %tx.worker_id,
            kind = %tx.r#type,
            amount = %tx.amount,
            "transaction recorded"
        );
        Ok(tx)
    }

    pub async fn get_transaction(&self, id: &TransactionId) -> Result<Transaction> {
        self.transactions
            .get(id)
            .await?
            .ok_or_else(|| PayrollError::TransactionNotFound(id.clone()))
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.transactions.list(FETCH_LIMIT).await
    }

    /// Lists a worker's transactions, newest first.
    ///
    /// Does not check that the worker exists: an unknown id yields an empty list.
    pub async fn list_worker_transactions(&self, worker_id: &WorkerId) -> Result<Vec<Transaction>> {
        self.transactions
            .list_for_worker(worker_id, FETCH_LIMIT)
            .await
    }

    /// Deletes a single transaction. Its worker is left untouched.
    pub async fn delete_transaction(&self, id: &TransactionId) -> Result<()> {
        if !self.transactions.remove(id).await? {
            return Err(PayrollError::TransactionNotFound(id.clone()));
        }
        info!(transaction_id = %id, "transaction deleted");
        Ok(())
    }

    pub async fn worker_balance(&self, worker_id: &WorkerId) -> Result<WorkerBalance> {
        let worker = self.get_worker(worker_id).await?;
        self.balance_of(worker).await
    }

    /// Computes the balance of every listed worker, in listing order.
    ///
    /// Issues one transaction query per worker.
    pub async fn all_worker_balances(&self) -> Result<Vec<WorkerBalance>> {
        let workers = self.workers.list(FETCH_LIMIT).await?;
        let mut balances = Vec::with_capacity(workers.len());

        for worker in workers {
            balances.push(self.balance_of(worker).await?);
        }

        debug!(count = balances.len(), "computed worker balances");
        Ok(balances)
    }

    async fn balance_of(&self, worker: Worker) -> Result<WorkerBalance> {
        let transactions = self
            .transactions
            .list_for_worker(&worker.id, FETCH_LIMIT)
            .await?;
        Ok(WorkerBalance::compute(worker, transactions))
    }
}
