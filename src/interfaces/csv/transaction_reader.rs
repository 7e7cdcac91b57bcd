use crate::domain::transaction::NewTransaction;
use crate::error::{PayrollError, Result};
use std::io::Read;

/// Reads transaction entries from a CSV source.
///
/// Expects the header `worker_id,type,amount,description`. The description
/// column may be empty or missing. Whitespace is trimmed and record lengths
/// are flexible.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    /// Creates a new `TransactionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes entries.
    ///
    /// A malformed row yields an error for that row only; later rows are still read.
    pub fn entries(self) -> impl Iterator<Item = Result<NewTransaction>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PayrollError::from))
    }
}
