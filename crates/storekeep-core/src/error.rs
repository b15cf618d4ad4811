//! # Error Types
//!
//! Domain-specific error types for storekeep-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  storekeep-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  storekeep-db errors (separate crate)                               │
//! │  └── DbError          - Storage failures, wraps CoreError           │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → caller               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (name, id, available stock)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every catalog/cart/commit failure is one of these variants, returned to
/// the caller and never swallowed. The one exception is `MalformedRecord`,
/// which report code recovers from locally (skip and continue) so one bad
/// historical row cannot block a whole summary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A carted product was deleted from the catalog before commit.
    #[error("Product no longer exists: {name}")]
    ProductMissing { name: String },

    /// Insufficient stock to complete a sale.
    ///
    /// `available` is the stock still uncommitted to earlier lines of the
    /// same cart, so the operator sees how many could actually be sold.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A second product with the same name was rejected.
    #[error("Product name '{name}' already exists")]
    DuplicateName { name: String },

    /// Commit was attempted on a cart with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart operation referenced a line index that does not exist.
    #[error("No cart line at index {index}")]
    LineNotFound { index: usize },

    /// A stored ledger entry's line-item payload could not be parsed.
    #[error("Ledger entry {entry_id} has a malformed line-item payload")]
    MalformedRecord { entry_id: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator input doesn't meet the field rules, before any
/// business logic runs. An invalid field aborts the whole operation with
/// zero side effects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid format (bad characters, malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
