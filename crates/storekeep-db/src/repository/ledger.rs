//! # Ledger Repository
//!
//! Read access to the append-only transaction ledger. Rows are written by
//! the transaction engine only; nothing here mutates them.
//!
//! ## Payload Handling
//! The frozen line items live in a JSON column. A row whose payload no
//! longer parses is handled differently per operation:
//! - `list` skips it with a warning, so one bad row cannot blank the
//!   whole history view
//! - `get` and `invoice` fail loudly, because the caller asked for that
//!   specific record and silently serving half of it would be worse

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::warn;

use crate::error::{DbError, DbResult};
use storekeep_core::{CoreError, Invoice, LedgerEntry, LineItem, Money, TaxRate, TimeWindow};

/// Database row shape for `transactions`. `line_items` is the still-serialized
/// JSON payload.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    id: i64,
    label: String,
    line_items: String,
    total_revenue_cents: i64,
    total_expense_cents: i64,
    committed_at: DateTime<Utc>,
}

impl EntryRow {
    fn into_entry(self) -> Result<LedgerEntry, serde_json::Error> {
        let line_items: Vec<LineItem> = serde_json::from_str(&self.line_items)?;
        Ok(LedgerEntry {
            id: self.id,
            label: self.label,
            committed_at: self.committed_at,
            line_items,
            total_revenue: Money::from_cents(self.total_revenue_cents),
            total_expense: Money::from_cents(self.total_expense_cents),
        })
    }
}

const SELECT_ENTRY: &str = "SELECT id, label, line_items, total_revenue_cents, \
     total_expense_cents, committed_at FROM transactions";

/// Repository for reading committed ledger entries.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LedgerRepository { pool }
    }

    /// Lists ledger entries inside `window`, newest first.
    ///
    /// Rows with an unparseable payload are skipped with a warning
    /// rather than failing the whole listing.
    pub async fn list(&self, window: TimeWindow) -> DbResult<Vec<LedgerEntry>> {
        let rows = match window.since(Utc::now()) {
            Some(since) => {
                sqlx::query_as::<_, EntryRow>(&format!(
                    "{SELECT_ENTRY} WHERE committed_at >= ?1 ORDER BY committed_at DESC, id DESC"
                ))
                .bind(since)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, EntryRow>(&format!(
                    "{SELECT_ENTRY} ORDER BY committed_at DESC, id DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id;
            match row.into_entry() {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    warn!(entry_id = id, error = %err, "Skipping ledger entry with malformed payload");
                }
            }
        }

        Ok(entries)
    }

    /// Gets a single ledger entry by id.
    ///
    /// Unlike `list`, a malformed payload here is a hard error.
    pub async fn get(&self, id: i64) -> DbResult<LedgerEntry> {
        let row = sqlx::query_as::<_, EntryRow>(&format!("{SELECT_ENTRY} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Transaction", id))?;

        row.into_entry()
            .map_err(|_| CoreError::MalformedRecord { entry_id: id }.into())
    }

    /// Builds the invoice view of entry `id` at tax rate `rate`.
    ///
    /// The subtotal is recomputed from the frozen line subtotals, the tax
    /// from the rate the caller passes in; the stored row is untouched.
    pub async fn invoice(&self, id: i64, rate: TaxRate) -> DbResult<Invoice> {
        let entry = self.get(id).await?;

        let subtotal: Money = entry.line_items.iter().map(|line| line.subtotal).sum();
        let tax = subtotal.calculate_tax(rate);

        Ok(Invoice {
            entry_id: entry.id,
            label: entry.label,
            committed_at: entry.committed_at,
            lines: entry.line_items,
            subtotal,
            tax,
            total: subtotal + tax,
        })
    }

    /// Counts ledger entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
