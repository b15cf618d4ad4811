//! # storekeep-db
//!
//! SQLite persistence for the storekeep ledger. This crate owns every
//! database touchpoint: the connection pool, embedded migrations, the
//! catalog repository, the transaction engine's commit protocol, ledger
//! reads and financial rollups. All pure domain logic lives in
//! `storekeep-core`; this crate only moves it in and out of SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Database                            │
//! │                 (pool + embedded migrations)                │
//! └───────┬───────────────┬───────────────┬───────────────┬─────┘
//!         │               │               │               │
//!   ┌─────▼─────┐  ┌──────▼──────┐  ┌─────▼─────┐  ┌──────▼──────┐
//!   │  Catalog   │  │ Transaction │  │  Ledger   │  │   Reports   │
//!   │ Repository │  │   Engine    │  │ Repository│  │             │
//!   │            │  │             │  │           │  │             │
//!   │ products   │  │ validate +  │  │ read-only │  │ rollups over│
//!   │ CRUD       │  │ apply + log │  │ history   │  │ time windows│
//!   └────────────┘  └─────────────┘  └───────────┘  └─────────────┘
//! ```
//!
//! The transaction engine is the only writer of the `transactions` table
//! and the only caller of the catalog's stock decrement; both run inside
//! one SQLite transaction per commit.

pub mod engine;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod reports;
pub mod repository;

pub use engine::TransactionEngine;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use reports::Reports;
pub use repository::{CatalogRepository, LedgerRepository};
