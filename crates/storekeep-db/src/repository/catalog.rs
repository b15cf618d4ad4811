//! # Catalog Repository
//!
//! Database operations for the product catalog: the single source of
//! truth for "how much stock is there right now."
//!
//! ## Key Operations
//! - CRUD with shared field validation (same rules as commit inputs)
//! - Exact-name lookup for cart population
//! - Stock decrement, used only by the transaction engine inside its
//!   commit transaction

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use storekeep_core::validation::{validate_product, ProductInput};
use storekeep_core::{CoreError, Money, Product};

/// Database row shape for `products`. Monetary columns are integer cents.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    item_type: String,
    quantity: i64,
    price_cents: i64,
    cost_cents: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            item_type: row.item_type,
            quantity: row.quantity,
            price: Money::from_cents(row.price_cents),
            cost: Money::from_cents(row.cost_cents),
        }
    }
}

const SELECT_PRODUCT: &str =
    "SELECT id, name, item_type, quantity, price_cents, cost_cents FROM products";

/// Repository for catalog database operations.
///
/// ## Usage
/// ```rust,ignore
/// let catalog = db.catalog();
/// let product = catalog.add("Widget", "Tool", "10.00", "4.00", 5).await?;
/// let found = catalog.find_by_name("Widget").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Adds a product to the catalog.
    ///
    /// `price` and `cost` arrive as operator-entered decimal strings and
    /// go through the shared field validation before anything touches the
    /// database. A name collision (case-sensitive exact match) is a
    /// reported error, not a crash; the UNIQUE constraint is the backstop.
    pub async fn add(
        &self,
        name: &str,
        item_type: &str,
        price: &str,
        cost: &str,
        quantity: i64,
    ) -> DbResult<Product> {
        let input = validate_product(name, item_type, price, cost, quantity)
            .map_err(CoreError::from)?;

        if self.find_by_name(&input.name).await?.is_some() {
            return Err(CoreError::DuplicateName { name: input.name }.into());
        }

        debug!(name = %input.name, "Inserting product");

        let result = sqlx::query(
            "INSERT INTO products (name, item_type, quantity, price_cents, cost_cents) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&input.name)
        .bind(&input.item_type)
        .bind(input.quantity)
        .bind(input.price.cents())
        .bind(input.cost.cents())
        .execute(&self.pool)
        .await?;

        Ok(product_from_input(result.last_insert_rowid(), input))
    }

    /// Replaces every field of the product with id `id`.
    ///
    /// Same validation as `add`. Fails if the id is gone, or if the new
    /// name belongs to a *different* product.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        item_type: &str,
        price: &str,
        cost: &str,
        quantity: i64,
    ) -> DbResult<Product> {
        let input = validate_product(name, item_type, price, cost, quantity)
            .map_err(CoreError::from)?;

        if self.get_by_id(id).await?.is_none() {
            return Err(DbError::not_found("Product", id));
        }
        if let Some(existing) = self.find_by_name(&input.name).await? {
            if existing.id != id {
                return Err(CoreError::DuplicateName { name: input.name }.into());
            }
        }

        debug!(id, name = %input.name, "Updating product");

        sqlx::query(
            "UPDATE products SET name = ?2, item_type = ?3, quantity = ?4, \
             price_cents = ?5, cost_cents = ?6 WHERE id = ?1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.item_type)
        .bind(input.quantity)
        .bind(input.price.cents())
        .bind(input.cost.cents())
        .execute(&self.pool)
        .await?;

        Ok(product_from_input(id, input))
    }

    /// Removes the product with id `id`.
    ///
    /// Idempotent: removing an id that no longer exists is not an error.
    pub async fn remove(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, removed = result.rows_affected(), "Removed product");
        Ok(())
    }

    /// Gets a product by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Exact-match name lookup, used by cart population.
    pub async fn find_by_name(&self, name: &str) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE name = ?1"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Lists products whose name or type contains `filter`
    /// (case-insensitive). An empty filter lists the whole catalog,
    /// ordered by name.
    pub async fn list(&self, filter: &str) -> DbResult<Vec<Product>> {
        let filter = filter.trim();

        debug!(filter = %filter, "Listing products");

        let rows = if filter.is_empty() {
            sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} ORDER BY name"))
                .fetch_all(&self.pool)
                .await?
        } else {
            let pattern = format!("%{filter}%");
            sqlx::query_as::<_, ProductRow>(&format!(
                "{SELECT_PRODUCT} WHERE name LIKE ?1 OR item_type LIKE ?1 ORDER BY name"
            ))
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// All product names, ordered. Feeds the search-as-you-type widget.
    pub async fn names(&self) -> DbResult<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>("SELECT name FROM products ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(names)
    }

    /// Counts catalog entries (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Decrements stock for `name` by `amount` on an existing connection.
    ///
    /// Executor-scoped (not pool-scoped) so the transaction engine can
    /// run it inside its commit transaction; nothing else calls this.
    /// Stock can never go negative: the read and the guarded UPDATE both
    /// run inside the caller's transaction.
    pub(crate) async fn decrement_stock(
        conn: &mut SqliteConnection,
        name: &str,
        amount: i64,
    ) -> DbResult<()> {
        let available: Option<i64> =
            sqlx::query_scalar("SELECT quantity FROM products WHERE name = ?1")
                .bind(name)
                .fetch_optional(&mut *conn)
                .await?;

        let available = available.ok_or_else(|| CoreError::ProductMissing {
            name: name.to_string(),
        })?;

        if available < amount {
            return Err(CoreError::InsufficientStock {
                name: name.to_string(),
                available,
                requested: amount,
            }
            .into());
        }

        sqlx::query("UPDATE products SET quantity = quantity - ?1 WHERE name = ?2")
            .bind(amount)
            .bind(name)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

fn product_from_input(id: i64, input: ProductInput) -> Product {
    Product {
        id,
        name: input.name,
        item_type: input.item_type,
        quantity: input.quantity,
        price: input.price,
        cost: input.cost,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use storekeep_core::ValidationError;

    #[tokio::test]
    async fn test_add_and_lookup() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        let product = catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        assert!(product.id > 0);
        assert_eq!(product.price, Money::from_cents(1000));
        assert_eq!(product.cost, Money::from_cents(400));

        let found = catalog.find_by_name("Widget").await.unwrap().unwrap();
        assert_eq!(found, product);

        // Exact match is case-sensitive.
        assert!(catalog.find_by_name("widget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_rejects_duplicate_name() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        let err = catalog.add("Widget", "Other", "1", "1", 1).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::DuplicateName { ref name }) if name == "Widget"
        ));

        assert_eq!(catalog.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_price_with_no_side_effects() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        // More than two decimal places fails on the price field.
        let err = catalog.add("Ace", "Tool", "10.999", "5", 1).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Core(CoreError::Validation(ValidationError::InvalidFormat {
                field: "price",
                ..
            }))
        ));

        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_full_field_replace() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        let product = catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        let updated = catalog
            .update(product.id, "Widget Pro", "Tool", "12.50", "5.00", 8)
            .await
            .unwrap();

        assert_eq!(updated.id, product.id);
        assert_eq!(updated.name, "Widget Pro");
        assert_eq!(updated.price, Money::from_cents(1250));

        let found = catalog.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(found, updated);
        assert!(catalog.find_by_name("Widget").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_id_and_name_collision() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        let a = catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        let b = catalog.add("Gadget", "Tool", "20.00", "8.00", 3).await.unwrap();

        let err = catalog
            .update(9999, "Name", "Tool", "1", "1", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Renaming b to a's name collides; renaming to its own name is fine.
        let err = catalog
            .update(b.id, "Widget", "Tool", "20.00", "8.00", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Core(CoreError::DuplicateName { .. })));
        assert!(catalog
            .update(a.id, "Widget", "Tool", "10.00", "4.00", 5)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        let product = catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();

        catalog.remove(product.id).await.unwrap();
        assert_eq!(catalog.count().await.unwrap(), 0);

        // Second removal of the same id is not an error.
        catalog.remove(product.id).await.unwrap();
        assert_eq!(catalog.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_filters_on_name_and_type() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        catalog.add("Cola", "Drink", "2.00", "1.00", 24).await.unwrap();
        catalog.add("Water", "Drink", "1.00", "0.40", 36).await.unwrap();

        let all = catalog.list("").await.unwrap();
        assert_eq!(all.len(), 3);
        // Ordered by name.
        assert_eq!(all[0].name, "Cola");

        let drinks = catalog.list("drink").await.unwrap();
        assert_eq!(drinks.len(), 2);

        let widgets = catalog.list("wid").await.unwrap();
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].name, "Widget");
    }

    #[tokio::test]
    async fn test_names_for_autocomplete() {
        let db = Database::in_memory().await.unwrap();
        let catalog = db.catalog();

        catalog.add("Widget", "Tool", "10.00", "4.00", 5).await.unwrap();
        catalog.add("Cola", "Drink", "2.00", "1.00", 24).await.unwrap();

        assert_eq!(catalog.names().await.unwrap(), vec!["Cola", "Widget"]);
    }
}
