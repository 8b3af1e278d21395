//! Ledger domain model: transactions, the ledger that owns them, and
//! derived reports.

pub mod ledger;
pub mod report;
pub mod transaction;

pub use ledger::Ledger;
pub use report::{CategoryTotal, Statistics};
pub use transaction::{Category, Transaction, TransactionKind, TransactionPatch, DATE_FORMAT};
