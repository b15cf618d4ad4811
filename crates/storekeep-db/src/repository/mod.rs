//! Repository modules for database operations.

pub mod catalog;
pub mod ledger;

pub use catalog::CatalogRepository;
pub use ledger::LedgerRepository;
