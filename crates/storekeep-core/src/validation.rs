//! # Validation Module
//!
//! Field rules shared by product create/edit and cart inputs.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  name, item_type   trimmed, ^[A-Za-z0-9 ]{2,}$                      │
//! │  price, cost       decimal string, ^\d+(\.\d{1,2})?$  → cents       │
//! │  catalog quantity  0..=1000                                         │
//! │  cart quantity     1..=1000                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any violation aborts the whole operation with zero side effects; the
//! returned error names the offending field.

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_LINE_QUANTITY, MAX_STOCK_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A fully validated product input, ready for the catalog. Price and cost
/// have already been parsed from their decimal-string form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub item_type: String,
    pub quantity: i64,
    pub price: Money,
    pub cost: Money,
}

/// Validates all product fields in form order (name, type, price, cost,
/// quantity); the first failing field wins.
pub fn validate_product(
    name: &str,
    item_type: &str,
    price: &str,
    cost: &str,
    quantity: i64,
) -> ValidationResult<ProductInput> {
    let name = validate_label("name", name)?;
    let item_type = validate_label("type", item_type)?;
    let price = validate_amount("price", price)?;
    let cost = validate_amount("cost", cost)?;
    validate_stock_quantity(quantity)?;

    Ok(ProductInput {
        name,
        item_type,
        quantity,
        price,
        cost,
    })
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a name/type string: trimmed, at least 2 characters, letters,
/// digits and spaces only. Returns the trimmed value.
fn validate_label(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() < 2 {
        return Err(ValidationError::TooShort { field, min: 2 });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must contain only letters, numbers, and spaces",
        });
    }

    Ok(value.to_string())
}

/// Validates a monetary amount string and parses it to cents.
fn validate_amount(field: &'static str, value: &str) -> ValidationResult<Money> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }

    Money::parse_decimal(value).ok_or(ValidationError::InvalidFormat {
        field,
        reason: "must be an amount between 0 and 9999999.99 with at most two decimal places",
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog stock quantity (zero stock is allowed).
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 0,
            max: MAX_STOCK_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a cart line quantity (a line always sells at least one unit).
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
