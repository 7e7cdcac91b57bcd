pub mod balance_writer;
pub mod transaction_reader;
