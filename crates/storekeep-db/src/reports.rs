//! # Financial Reports
//!
//! Revenue, expense and profit rollups over the ledger. Figures come from
//! the frozen line items, never from the live catalog, so a price edit
//! today cannot rewrite last month's numbers.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::DbResult;
use storekeep_core::{LineItem, Money, Summary, TimeWindow};

/// Aggregates committed sales into revenue/expense/profit summaries.
#[derive(Debug, Clone)]
pub struct Reports {
    pool: SqlitePool,
}

impl Reports {
    /// Creates a new Reports accessor.
    pub fn new(pool: SqlitePool) -> Self {
        Reports { pool }
    }

    /// Sums revenue and expense over every ledger entry inside `window`.
    ///
    /// Revenue is the sum of line subtotals, expense the sum of line
    /// subexpenses; profit is their difference. Entries with a malformed
    /// payload are skipped with a warning, same policy as ledger listing.
    pub async fn summarize(&self, window: TimeWindow) -> DbResult<Summary> {
        let rows: Vec<(i64, String)> = match window.since(Utc::now()) {
            Some(since) => {
                sqlx::query_as(
                    "SELECT id, line_items FROM transactions WHERE committed_at >= ?1",
                )
                .bind(since)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as("SELECT id, line_items FROM transactions")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        let mut revenue = Money::zero();
        let mut expense = Money::zero();
        for (id, payload) in rows {
            let lines: Vec<LineItem> = match serde_json::from_str(&payload) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!(entry_id = id, error = %err, "Skipping malformed entry in summary");
                    continue;
                }
            };
            for line in &lines {
                revenue += line.subtotal;
                expense += line.subexpense;
            }
        }

        Ok(Summary::new(revenue, expense))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
