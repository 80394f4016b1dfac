//! Order Repository
//!
//! The transactional side of the order core: cart aggregation, status
//! transitions, bulk checkout and the projection queries. Pure decisions
//! (validation, transition legality, row grouping) are delegated to
//! [`crate::orders`]; this file owns the SQL and the locking.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{Order, OrderRow, OrderStatus, OrderView, Product};
use crate::orders::{
    LineItemRequest, OrderAction, OrderError, OrderResult, StatusFilter, group_rows, price_lines,
    transitions,
};

/// Shared projection SELECT: order x both party profiles x LEFT JOIN item
/// x product name. One row per item, one NULL-item row for empty orders.
const ORDER_VIEW_SELECT: &str = "
    SELECT o.id, o.buyer_id, o.vendor_id, o.status, o.total_price, o.created_at,
           b.name AS buyer_name, b.avatar_url AS buyer_avatar_url,
           v.name AS vendor_name, v.avatar_url AS vendor_avatar_url,
           i.id AS item_id, i.product_id AS item_product_id,
           i.quantity AS item_quantity, i.price_at_order AS item_price_at_order,
           p.name AS item_product_name
    FROM orders o
    JOIN users b ON b.id = o.buyer_id
    JOIN users v ON v.id = o.vendor_id
    LEFT JOIN order_items i ON i.order_id = o.id
    LEFT JOIN products p ON p.id = i.product_id
";

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Aggregation
    // =========================================================================

    /// Merge the requested lines into the buyer's pending cart for this
    /// vendor, creating the cart if none exists. Returns the order id.
    ///
    /// Runs as one transaction: product resolution, the `FOR UPDATE`
    /// pending-cart lookup, the total update/insert and the item inserts
    /// either all commit or all roll back. The partial unique index on
    /// (buyer_id, vendor_id) WHERE status = 'pending' backstops two
    /// concurrent placements both deciding to create.
    pub async fn place_order(
        &self,
        buyer_id: Uuid,
        vendor_id: Uuid,
        items: &[LineItemRequest],
    ) -> OrderResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        let product_ids: Vec<Uuid> = items.iter().map(|i| i.product_id).collect();
        let products: Vec<Product> = sqlx::query_as(
            "SELECT id, vendor_id, name, price, is_available
             FROM products WHERE id = ANY($1)",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await?;

        let by_id: HashMap<Uuid, Product> = products.into_iter().map(|p| (p.id, p)).collect();
        let (lines, new_items_total) = price_lines(vendor_id, items, &by_id)?;

        // Serialize concurrent placements against the same cart.
        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM orders
             WHERE buyer_id = $1 AND vendor_id = $2 AND status = 'pending'
             FOR UPDATE",
        )
        .bind(buyer_id)
        .bind(vendor_id)
        .fetch_optional(&mut *tx)
        .await?;

        let order_id = match existing {
            Some((id,)) => {
                sqlx::query("UPDATE orders SET total_price = total_price + $1 WHERE id = $2")
                    .bind(new_items_total)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                id
            }
            None => {
                let (id,): (Uuid,) = sqlx::query_as(
                    "INSERT INTO orders (buyer_id, vendor_id, status, total_price)
                     VALUES ($1, $2, 'pending', $3)
                     RETURNING id",
                )
                .bind(buyer_id)
                .bind(vendor_id)
                .bind(new_items_total)
                .fetch_one(&mut *tx)
                .await?;
                id
            }
        };

        // Append-only: a product already in the pending cart gets another
        // row, preserving per-tap history rather than summing quantities.
        for line in &lines {
            sqlx::query(
                "INSERT INTO order_items (order_id, product_id, quantity, price_at_order)
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price_at_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            %order_id, %buyer_id, %vendor_id,
            merged = existing.is_some(),
            lines = lines.len(),
            added_total = new_items_total,
            "order placed"
        );

        Ok(order_id)
    }

    // =========================================================================
    // State machine
    // =========================================================================

    /// Apply a status transition on behalf of `caller`.
    ///
    /// Re-reads the persisted status under `FOR UPDATE` (never trusting a
    /// client-supplied status), verifies the caller is the party the
    /// action requires, then updates.
    pub async fn apply_transition(
        &self,
        order_id: Uuid,
        caller: Uuid,
        action: OrderAction,
    ) -> OrderResult<OrderStatus> {
        let mut tx = self.pool.begin().await?;

        let order: Option<Order> = sqlx::query_as(
            "SELECT id, buyer_id, vendor_id, status, total_price, created_at
             FROM orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?;

        let order = order.ok_or(OrderError::OrderNotFound(order_id))?;

        transitions::authorize(action, caller, order.buyer_id, order.vendor_id)?;
        let next = transitions::next_status(action, order.status)?;

        sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
            .bind(next)
            .bind(order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            %order_id, %caller,
            action = action.name(),
            from = %order.status,
            to = %next,
            "order transition applied"
        );

        Ok(next)
    }

    /// Transition every pending order of the buyer to `delivering` in one
    /// atomic update. The buyer-facing "pay for everything at once"
    /// shortcut; like the single-order pay path it bypasses `confirmed`.
    pub async fn checkout_all_pending(&self, buyer_id: Uuid) -> OrderResult<u64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE orders SET status = 'delivering'
             WHERE buyer_id = $1 AND status = 'pending'",
        )
        .bind(buyer_id)
        .execute(&mut *tx)
        .await?;

        let count = result.rows_affected();
        if count == 0 {
            // Dropping the transaction rolls it back.
            return Err(OrderError::NothingToCheckout);
        }

        tx.commit().await?;

        tracing::info!(%buyer_id, count, "bulk checkout completed");

        Ok(count)
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Fetch one order as a nested view, enforcing that the caller is a
    /// party to it. All joined rows come from a single query execution.
    pub async fn get_order_view(&self, order_id: Uuid, caller: Uuid) -> OrderResult<OrderView> {
        let sql = format!("{ORDER_VIEW_SELECT} WHERE o.id = $1");
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        let view = group_rows(rows)
            .into_iter()
            .next()
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if caller != view.buyer_id && caller != view.vendor_id {
            return Err(OrderError::Unauthorized);
        }

        Ok(view)
    }

    /// All of a buyer's orders (every status; the client separates active
    /// from history), newest first.
    pub async fn list_for_buyer(&self, buyer_id: Uuid) -> OrderResult<Vec<OrderView>> {
        let sql = format!("{ORDER_VIEW_SELECT} WHERE o.buyer_id = $1 ORDER BY o.created_at DESC, o.id");
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(buyer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(group_rows(rows))
    }

    /// A vendor's orders under a named status filter, newest first.
    pub async fn list_for_vendor(
        &self,
        vendor_id: Uuid,
        filter: StatusFilter,
    ) -> OrderResult<Vec<OrderView>> {
        let sql = format!(
            "{ORDER_VIEW_SELECT} WHERE o.vendor_id = $1 AND o.status = ANY($2)
             ORDER BY o.created_at DESC, o.id"
        );
        let rows: Vec<OrderRow> = sqlx::query_as(&sql)
            .bind(vendor_id)
            .bind(filter.statuses().to_vec())
            .fetch_all(&self.pool)
            .await?;
        Ok(group_rows(rows))
    }
}
