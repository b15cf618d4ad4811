//! # storekeep-core: Pure Business Logic for Storekeep
//!
//! This crate is the heart of Storekeep: the cart model, money arithmetic,
//! field validation, and the frozen ledger record types, all as pure code
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Storekeep Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                 UI / presentation (excluded)                  │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │             ★ storekeep-core (THIS CRATE) ★                   │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌────────────┐           │  │
//! │  │  │  types  │ │  money  │ │  cart   │ │ validation │           │  │
//! │  │  │ Product │ │  Money  │ │  Cart   │ │   rules    │           │  │
//! │  │  │ Ledger  │ │ TaxRate │ │CartLine │ │   checks   │           │  │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └────────────┘           │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO DATABASE • PURE FUNCTIONS                        │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │           storekeep-db (catalog, engine, ledger)              │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: deterministic, no side effects
//! 2. **Integer money**: all monetary values in cents (i64), never floats
//! 3. **Explicit errors**: typed error enums, never strings or panics
//! 4. **Frozen history**: ledger records carry value copies, never
//!    references into the live catalog

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-exports for convenience: `use storekeep_core::Money` instead of
// `use storekeep_core::money::Money`.
pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

/// Maximum quantity on a single cart line.
///
/// Guards against accidental over-ordering (typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 1000;

/// Maximum stock quantity a catalog edit may set.
pub const MAX_STOCK_QUANTITY: i64 = 1000;
