//! # Cart
//!
//! The staged, uncommitted set of sale lines.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Operator Action            Cart State Change                       │
//! │  ───────────────            ─────────────────                       │
//! │  Pick product  ───────────► lines.push(snapshot of price/cost)      │
//! │  Set quantity  ───────────► lines[i].quantity = n, recompute        │
//! │  +/- keys      ───────────► quantity ± 1, recompute                 │
//! │  Remove line   ───────────► lines.remove(i)                         │
//! │  Clear         ───────────► lines.clear()                           │
//! │                                                                     │
//! │  Stock is NOT checked here. The commit protocol validates every     │
//! │  line against the catalog inside one transaction.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are keyed by row position, not product identity: picking the
//! same product twice yields two lines, never a merge. The cart is a
//! short-lived, single-session object, discarded after a successful
//! commit or an explicit clear.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_line_quantity;
use crate::MAX_LINE_QUANTITY;

/// One staged sale line.
///
/// `unit_price`/`unit_cost` are snapshots taken when the line was added;
/// a later catalog edit does not reach back into a staged line. The
/// derived totals are recomputed by exactly one place, [`CartLine::recompute`],
/// after every quantity change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    pub item_type: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub unit_cost: Money,
    /// quantity × unit_price.
    pub subtotal: Money,
    /// quantity × unit_cost. Never shown pre-commit; persisted into the
    /// ledger so profit stays computable after catalog prices change.
    pub subexpense: Money,
}

impl CartLine {
    fn new(product: &Product, quantity: i64) -> Self {
        let mut line = CartLine {
            name: product.name.clone(),
            item_type: product.item_type.clone(),
            quantity,
            unit_price: product.price,
            unit_cost: product.cost,
            subtotal: Money::zero(),
            subexpense: Money::zero(),
        };
        line.recompute();
        line
    }

    /// Recomputes the derived totals. The only place line arithmetic
    /// happens.
    fn recompute(&mut self) {
        self.subtotal = self.unit_price.multiply_quantity(self.quantity);
        self.subexpense = self.unit_cost.multiply_quantity(self.quantity);
    }
}

/// The shopping cart: an ordered, mutable collection of staged lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Appends a line for `product`, snapshotting its current price and
    /// cost. Appending is unconditional; stock is only checked at commit.
    pub fn add_line(&mut self, product: &Product, quantity: i64) -> CoreResult<()> {
        validate_line_quantity(quantity)?;
        self.lines.push(CartLine::new(product, quantity));
        Ok(())
    }

    /// Sets the quantity of the line at `index` and recomputes its totals.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        validate_line_quantity(quantity)?;
        let line = self.line_mut(index)?;
        line.quantity = quantity;
        line.recompute();
        Ok(())
    }

    /// Bumps the line's quantity by one, saturating at the maximum.
    pub fn increment(&mut self, index: usize) -> CoreResult<i64> {
        let line = self.line_mut(index)?;
        if line.quantity < MAX_LINE_QUANTITY {
            line.quantity += 1;
            line.recompute();
        }
        Ok(line.quantity)
    }

    /// Drops the line's quantity by one, stopping at 1.
    pub fn decrement(&mut self, index: usize) -> CoreResult<i64> {
        let line = self.line_mut(index)?;
        if line.quantity > 1 {
            line.quantity -= 1;
            line.recompute();
        }
        Ok(line.quantity)
    }

    /// Removes and returns the line at `index`.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CoreError::LineNotFound { index });
        }
        Ok(self.lines.remove(index))
    }

    /// Empties all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The staged lines, in operator order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Σ subtotal across lines. The only total shown before commit.
    pub fn total(&self) -> Money {
        self.lines.iter().map(|l| l.subtotal).sum()
    }

    /// Σ subexpense across lines. Feeds the ledger at commit; never
    /// displayed pre-commit.
    pub fn expense_total(&self) -> Money {
        self.lines.iter().map(|l| l.subexpense).sum()
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut CartLine> {
        self.lines
            .get_mut(index)
            .ok_or(CoreError::LineNotFound { index })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    fn widget(price_cents: i64, cost_cents: i64) -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            item_type: "Tool".to_string(),
            quantity: 5,
            price: Money::from_cents(price_cents),
            cost: Money::from_cents(cost_cents),
        }
    }

    #[test]
    fn test_add_line_snapshots_price_and_cost() {
        let mut cart = Cart::new();
        cart.add_line(&widget(1000, 400), 3).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.unit_price, Money::from_cents(1000));
        assert_eq!(line.unit_cost, Money::from_cents(400));
        assert_eq!(line.subtotal, Money::from_cents(3000));
        assert_eq!(line.subexpense, Money::from_cents(1200));
    }

    #[test]
    fn test_line_totals_at_amount_and_quantity_caps() {
        // The largest parseable price times the largest line quantity
        // must stay inside i64 cents.
        let max = Money::MAX_AMOUNT.cents();
        let mut cart = Cart::new();
        cart.add_line(&widget(max, max), crate::MAX_LINE_QUANTITY).unwrap();

        let line = &cart.lines()[0];
        assert_eq!(line.subtotal, Money::from_cents(999_999_999_000));
        assert_eq!(line.subexpense, Money::from_cents(999_999_999_000));
        assert_eq!(cart.total(), Money::from_cents(999_999_999_000));
    }

    #[test]
    fn test_duplicate_names_stay_separate_lines() {
        let mut cart = Cart::new();
        cart.add_line(&widget(1000, 400), 1).unwrap();
        cart.add_line(&widget(1000, 400), 2).unwrap();

        // No merge: two lines, keyed by position.
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Money::from_cents(3000));
    }

    #[test]
    fn test_set_quantity_recomputes_totals() {
        let mut cart = Cart::new();
        cart.add_line(&widget(250, 100), 1).unwrap();

        cart.set_quantity(0, 4).unwrap();
        assert_eq!(cart.lines()[0].subtotal, Money::from_cents(1000));
        assert_eq!(cart.lines()[0].subexpense, Money::from_cents(400));
    }

    #[test]
    fn test_set_quantity_bounds() {
        let mut cart = Cart::new();
        cart.add_line(&widget(250, 100), 1).unwrap();

        assert!(matches!(
            cart.set_quantity(0, 0),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            cart.set_quantity(0, 1001),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(cart.set_quantity(0, 1000).is_ok());
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add_line(&widget(100, 50), 1).unwrap();

        assert_eq!(cart.increment(0).unwrap(), 2);
        assert_eq!(cart.lines()[0].subtotal, Money::from_cents(200));

        assert_eq!(cart.decrement(0).unwrap(), 1);
        // Decrement saturates at 1.
        assert_eq!(cart.decrement(0).unwrap(), 1);
        assert_eq!(cart.lines()[0].subtotal, Money::from_cents(100));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_line(&widget(100, 50), 1).unwrap();
        cart.add_line(&widget(100, 50), 2).unwrap();

        let removed = cart.remove_line(0).unwrap();
        assert_eq!(removed.quantity, 1);
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_bad_index_is_line_not_found() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.set_quantity(3, 1),
            Err(CoreError::LineNotFound { index: 3 })
        ));
        assert!(matches!(
            cart.remove_line(0),
            Err(CoreError::LineNotFound { index: 0 })
        ));
    }
}
