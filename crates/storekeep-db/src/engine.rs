//! # Transaction Engine
//!
//! The atomic commit protocol: turns a cart into a stock decrement plus a
//! ledger append, all-or-nothing.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    commit(cart, label)                              │
//! │                                                                     │
//! │  1. Reject an empty cart                                            │
//! │  2. BEGIN one SQLite transaction                                    │
//! │  3. VALIDATE ALL: for each line, in cart order                      │
//! │     ├── product gone?          → ProductMissing, rollback           │
//! │     ├── stock < staged + qty?  → InsufficientStock, rollback        │
//! │     └── else stage the decrement                                    │
//! │  4. APPLY ALL: run every staged decrement                           │
//! │  5. APPEND: insert the ledger row with frozen line items            │
//! │  6. COMMIT                                                          │
//! │                                                                     │
//! │  Any error between BEGIN and COMMIT drops the transaction, which    │
//! │  rolls everything back. No partially-applied sale is observable.    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Validate all, then apply all" is what gives the all-or-nothing
//! guarantee without per-line compensating actions.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;
use crate::repository::catalog::CatalogRepository;
use storekeep_core::{Cart, CoreError, LedgerEntry, LineItem};

/// Validates a cart against the catalog and commits it as one sale.
#[derive(Debug, Clone)]
pub struct TransactionEngine {
    pool: SqlitePool,
}

impl TransactionEngine {
    /// Creates a new TransactionEngine.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionEngine { pool }
    }

    /// Commits `cart` as a single sale.
    ///
    /// On success the catalog's quantities are decremented per line and
    /// exactly one new [`LedgerEntry`] exists, carrying frozen copies of
    /// every line (name, quantity, unit price, unit cost, subtotal,
    /// subexpense) so history never drifts when the catalog changes
    /// later. On any failure nothing happened at all.
    pub async fn commit(&self, cart: &Cart, label: &str) -> DbResult<LedgerEntry> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let mut tx = self.pool.begin().await?;

        // Phase 1: validate all. Staged quantities accumulate per product
        // name, so two lines of the same product are checked against the
        // stock that earlier lines have not already claimed.
        let mut staged: Vec<(String, i64)> = Vec::new();
        for line in cart.lines() {
            let available: Option<i64> =
                sqlx::query_scalar("SELECT quantity FROM products WHERE name = ?1")
                    .bind(&line.name)
                    .fetch_optional(&mut *tx)
                    .await?;

            let available = available.ok_or_else(|| CoreError::ProductMissing {
                name: line.name.clone(),
            })?;

            let already_staged = staged
                .iter()
                .find(|(name, _)| name == &line.name)
                .map(|(_, qty)| *qty)
                .unwrap_or(0);
            let remaining = available - already_staged;

            if remaining < line.quantity {
                return Err(CoreError::InsufficientStock {
                    name: line.name.clone(),
                    available: remaining,
                    requested: line.quantity,
                }
                .into());
            }

            match staged.iter_mut().find(|(name, _)| name == &line.name) {
                Some(entry) => entry.1 += line.quantity,
                None => staged.push((line.name.clone(), line.quantity)),
            }
        }

        // Phase 2: apply all staged decrements.
        for (name, amount) in &staged {
            CatalogRepository::decrement_stock(&mut *tx, name, *amount).await?;
        }

        // Phase 3: append the ledger row with frozen line items.
        let line_items: Vec<LineItem> = cart.lines().iter().map(LineItem::from).collect();
        let payload = serde_json::to_string(&line_items)?;
        let total_revenue = cart.total();
        let total_expense = cart.expense_total();
        let committed_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO transactions \
             (label, line_items, total_revenue_cents, total_expense_cents, committed_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(label)
        .bind(&payload)
        .bind(total_revenue.cents())
        .bind(total_expense.cents())
        .bind(committed_at)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        tx.commit().await?;

        info!(
            entry_id = id,
            lines = line_items.len(),
            revenue = %total_revenue,
            "Sale committed"
        );

        Ok(LedgerEntry {
            id,
            label: label.to_string(),
            committed_at,
            line_items,
            total_revenue,
            total_expense,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
