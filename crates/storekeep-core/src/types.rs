//! # Domain Types
//!
//! Core domain types used throughout Storekeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │   Product     │   │  LedgerEntry  │   │   LineItem    │          │
//! │  │ ───────────── │   │ ───────────── │   │ ───────────── │          │
//! │  │ id (i64)      │   │ id (monotonic)│   │ name          │          │
//! │  │ name (unique) │   │ label         │   │ quantity      │          │
//! │  │ quantity      │   │ committed_at  │   │ price / cost  │          │
//! │  │ price / cost  │   │ line_items    │   │ subtotal /    │          │
//! │  └───────────────┘   │ totals        │   │ subexpense    │          │
//! │                      └───────────────┘   └───────────────┘          │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │   TaxRate     │   │  TimeWindow   │   │   Summary     │          │
//! │  │ bps (u32)     │   │ Today/1m/3m/  │   │ revenue       │          │
//! │  │ 825 = 8.25%   │   │ 1y/All        │   │ expense       │          │
//! │  └───────────────┘   └───────────────┘   │ profit        │          │
//! │                                          └───────────────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Once a `LedgerEntry` is committed it is immutable: its line items are
//! value copies taken at commit time, never references into the catalog,
//! so financial history stays reproducible regardless of later edits.

use chrono::{DateTime, Months, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%; 825 bps = 8.25%. Applied only when building
/// invoice data; the ledger itself stores pre-tax figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry: one product with its current stock and prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable row id, assigned by the catalog on insert.
    pub id: i64,

    /// Display name. Unique across the catalog, case-sensitive.
    pub name: String,

    /// Product category ("Tool", "Drink", ...).
    pub item_type: String,

    /// Quantity on hand. Never negative.
    pub quantity: i64,

    /// Sell price per unit.
    pub price: Money,

    /// Bought (cost) price per unit, for profit reporting.
    pub cost: Money,
}

// =============================================================================
// Line Item (frozen ledger payload)
// =============================================================================

/// One frozen line of a committed sale.
///
/// ## Snapshot Pattern
/// Values are copied out of the cart at commit time. `cost` and
/// `subexpense` default to zero when deserializing, because ledger rows
/// written before those fields existed do not carry them; a legacy row
/// must still parse rather than poison the whole ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub quantity: i64,
    /// Unit sell price at time of sale (frozen).
    pub price: Money,
    /// Unit cost at time of sale (frozen). Absent in legacy rows.
    #[serde(default)]
    pub cost: Money,
    /// quantity × price.
    pub subtotal: Money,
    /// quantity × cost. Absent in legacy rows.
    #[serde(default)]
    pub subexpense: Money,
}

impl From<&CartLine> for LineItem {
    fn from(line: &CartLine) -> Self {
        LineItem {
            name: line.name.clone(),
            quantity: line.quantity,
            price: line.unit_price,
            cost: line.unit_cost,
            subtotal: line.subtotal,
            subexpense: line.subexpense,
        }
    }
}

// =============================================================================
// Ledger Entry
// =============================================================================

/// One committed sale. Append-only; immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Monotonic id assigned at commit.
    pub id: i64,

    /// Operator-supplied transaction name. May be empty, may repeat.
    pub label: String,

    /// Commit timestamp, assigned at commit.
    pub committed_at: DateTime<Utc>,

    /// Frozen line items, in cart order.
    pub line_items: Vec<LineItem>,

    /// Σ subtotal across line items.
    pub total_revenue: Money,

    /// Σ subexpense across line items.
    pub total_expense: Money,
}

// =============================================================================
// Invoice
// =============================================================================

/// Invoice data for one ledger entry: the frozen lines plus a tax total
/// computed deterministically from subtotals alone. Rendering (HTML/PDF)
/// is owned by the excluded presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub entry_id: i64,
    pub label: String,
    pub committed_at: DateTime<Utc>,
    pub lines: Vec<LineItem>,
    /// Pre-tax revenue (Σ subtotal).
    pub subtotal: Money,
    /// Tax on the subtotal at the supplied rate.
    pub tax: Money,
    /// subtotal + tax.
    pub total: Money,
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Revenue/expense/profit over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub revenue: Money,
    pub expense: Money,
    pub profit: Money,
}

impl Summary {
    pub fn new(revenue: Money, expense: Money) -> Self {
        Summary {
            revenue,
            expense,
            profit: revenue - expense,
        }
    }
}

// =============================================================================
// Time Window
// =============================================================================

/// Report windows exposed to the caller, evaluated against commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// The current calendar day (UTC).
    Today,
    /// Trailing one month.
    TrailingMonth,
    /// Trailing three months.
    TrailingQuarter,
    /// Trailing one year.
    TrailingYear,
    /// No filter.
    All,
}

impl TimeWindow {
    /// Lower bound for this window relative to `now`, or `None` for no
    /// filter. Entries with `committed_at >= since` are in the window.
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeWindow::Today => Some(
                now.date_naive()
                    .and_time(NaiveTime::MIN)
                    .and_utc(),
            ),
            TimeWindow::TrailingMonth => Some(sub_months(now, 1)),
            TimeWindow::TrailingQuarter => Some(sub_months(now, 3)),
            TimeWindow::TrailingYear => Some(sub_months(now, 12)),
            TimeWindow::All => None,
        }
    }
}

/// Calendar-aware subtraction. Falls back to the epoch for dates that
/// cannot be represented, which only widens the window.
fn sub_months(now: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(months))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(825);
        assert_eq!(rate.bps(), 825);
        assert!((rate.percentage() - 8.25).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_line_item_round_trip() {
        let item = LineItem {
            name: "Widget".to_string(),
            quantity: 3,
            price: Money::from_cents(1000),
            cost: Money::from_cents(400),
            subtotal: Money::from_cents(3000),
            subexpense: Money::from_cents(1200),
        };

        let json = serde_json::to_string(&vec![item.clone()]).unwrap();
        let back: Vec<LineItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![item]);
    }

    #[test]
    fn test_line_item_legacy_rows_default_cost_fields() {
        // Rows written before cost tracking carry only these four fields.
        let legacy = r#"[{"name":"Widget","quantity":2,"price":1000,"subtotal":2000}]"#;
        let items: Vec<LineItem> = serde_json::from_str(legacy).unwrap();

        assert_eq!(items[0].cost, Money::zero());
        assert_eq!(items[0].subexpense, Money::zero());
        assert_eq!(items[0].subtotal, Money::from_cents(2000));
    }

    #[test]
    fn test_summary_profit() {
        let s = Summary::new(Money::from_cents(150), Money::from_cents(80));
        assert_eq!(s.profit, Money::from_cents(70));
    }

    #[test]
    fn test_time_window_today_is_start_of_day() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let since = TimeWindow::Today.since(now).unwrap();
        assert_eq!(since, Utc.with_ymd_and_hms(2026, 3, 14, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_time_window_trailing_months() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();

        let one = TimeWindow::TrailingMonth.since(now).unwrap();
        assert_eq!(one, Utc.with_ymd_and_hms(2026, 2, 14, 15, 9, 26).unwrap());

        let year = TimeWindow::TrailingYear.since(now).unwrap();
        assert_eq!(year, Utc.with_ymd_and_hms(2025, 3, 14, 15, 9, 26).unwrap());
    }

    #[test]
    fn test_time_window_all_has_no_bound() {
        assert_eq!(TimeWindow::All.since(Utc::now()), None);
    }
}
