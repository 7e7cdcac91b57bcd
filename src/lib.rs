//! Payroll ledger for small crews: workers, the amounts owed to them and the
//! amounts paid, with balances derived on every read.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
