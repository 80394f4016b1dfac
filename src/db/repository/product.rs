//! Product Repository
//!
//! Read-only catalog access: the batch fetch used by order placement and
//! the storefront listing.

use sqlx::PgPool;

use crate::db::models::{ProductRow, ProductView};
use crate::orders::OrderResult;

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All currently available products with their vendor profile.
    pub async fn list_available(&self) -> OrderResult<Vec<ProductView>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT p.id, p.name, p.price,
                    u.name AS vendor_name, u.avatar_url AS vendor_avatar_url
             FROM products p
             JOIN users u ON u.id = p.vendor_id
             WHERE p.is_available = true
             ORDER BY u.name, p.name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductView::from).collect())
    }
}
