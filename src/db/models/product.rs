//! Product Model
//!
//! Vendor-owned catalog entries. The order core reads them to validate
//! line items and to snapshot prices; it never writes them.

use serde::Serialize;
use uuid::Uuid;

use super::user::UserSummary;

/// Catalog product row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub name: String,
    /// Live price in the smallest currency unit. Copied into
    /// `price_at_order` when purchased.
    pub price: i64,
    pub is_available: bool,
}

/// Join row for the catalog listing (product x vendor profile).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub vendor_name: String,
    pub vendor_avatar_url: Option<String>,
}

/// Catalog entry as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub vendor: UserSummary,
}

impl From<ProductRow> for ProductView {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            vendor: UserSummary {
                name: row.vendor_name,
                avatar_url: row.vendor_avatar_url,
            },
        }
    }
}
