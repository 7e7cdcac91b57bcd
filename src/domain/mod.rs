//! Domain model: workers, transactions, the derived balance view and the
//! storage ports the application layer depends on.

pub mod balance;
pub mod money;
pub mod ports;
pub mod transaction;
pub mod worker;
