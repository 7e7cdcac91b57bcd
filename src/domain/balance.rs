use super::money::Money;
use super::transaction::{Transaction, TransactionType};
use super::worker::Worker;
use serde::{Deserialize, Serialize};

/// Financial summary of one worker, derived from its transactions on every read.
///
/// `balance` is always `total_due - total_paid` for the transactions carried
/// in `transactions`; it is never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerBalance {
    pub worker: Worker,
    pub total_due: Money,
    pub total_paid: Money,
    pub balance: Money,
    pub transactions: Vec<Transaction>,
}

impl WorkerBalance {
    /// Aggregates the given transactions, summing in the order they are passed.
    pub fn compute(worker: Worker, transactions: Vec<Transaction>) -> Self {
        let mut total_due = Money::ZERO;
        let mut total_paid = Money::ZERO;

        for tx in &transactions {
            match tx.r#type {
                TransactionType::Due => total_due += tx.amount,
                TransactionType::Paid => total_paid += tx.amount,
            }
        }

        Self {
            worker,
            total_due,
            total_paid,
            balance: total_due - total_paid,
            transactions,
        }
    }
}
