//! Application layer containing the payroll operations.
//!
//! This module defines the `PayrollLedger`, which every front end calls into.
//! It coordinates the worker and transaction stores and derives balances on
//! demand.

pub mod ledger;
