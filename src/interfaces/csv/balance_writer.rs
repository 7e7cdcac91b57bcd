use crate::domain::balance::WorkerBalance;
use crate::domain::money::Money;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

const HEADER: [&str; 5] = ["worker_id", "name", "total_due", "total_paid", "balance"];

#[derive(Serialize)]
struct BalanceRow<'a> {
    worker_id: &'a str,
    name: &'a str,
    total_due: Money,
    total_paid: Money,
    balance: Money,
}

/// Writes one summary row per worker balance; transactions are left out.
pub struct BalanceWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> BalanceWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self { writer }
    }

    /// Writes the header, then every balance, then flushes.
    ///
    /// The header is written even when there are no balances.
    pub fn write_balances<'a, I>(&mut self, balances: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a WorkerBalance>,
    {
        self.writer.write_record(HEADER)?;
        for balance in balances {
            self.writer.serialize(BalanceRow {
                worker_id: balance.worker.id.as_str(),
                name: &balance.worker.name,
                total_due: balance.total_due,
                total_paid: balance.total_paid,
                balance: balance.balance,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
