//! Order Models
//!
//! An order is one buyer's purchase relationship with one vendor. Line
//! items carry a price snapshot taken at purchase time, so historical
//! totals survive later catalog price changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;

// =============================================================================
// Order Status
// =============================================================================

/// Order status enum. `Completed` and `Cancelled` are terminal; terminal
/// orders are retained as history, never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivering,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Rows
// =============================================================================

/// Order row as persisted. Line items live in `order_items` and are
/// immutable after insert, deleted only by cascade with their order.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Order {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub vendor_id: Uuid,
    pub status: OrderStatus,
    /// Smallest currency unit; always equals the sum of
    /// quantity x price_at_order over the order's items.
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

/// Flat join row produced by the projection queries: order x buyer profile
/// x vendor profile x (LEFT JOIN) item x product name. Orders with no
/// items yield a single row whose item columns are all NULL.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub vendor_id: Uuid,
    pub status: OrderStatus,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub buyer_name: String,
    pub buyer_avatar_url: Option<String>,
    pub vendor_name: String,
    pub vendor_avatar_url: Option<String>,
    pub item_id: Option<Uuid>,
    pub item_product_id: Option<Uuid>,
    pub item_quantity: Option<i32>,
    pub item_price_at_order: Option<i64>,
    pub item_product_name: Option<String>,
}

// =============================================================================
// Views
// =============================================================================

/// Nested order shape returned by the API: one object per order with both
/// party profiles and the full item list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: Uuid,
    pub buyer_id: Uuid,
    pub vendor_id: Uuid,
    pub status: OrderStatus,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub buyer: UserSummary,
    pub vendor: UserSummary,
    pub items: Vec<OrderItemView>,
}

/// One line of an [`OrderView`], with the product name resolved for
/// display and the frozen purchase-time price.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub price_at_order: i64,
}
