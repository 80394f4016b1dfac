//! Row fan-in: normalized join rows -> nested order views.
//!
//! The projection queries return one row per (order, item) pair, so an
//! order with N items arrives as N rows (and a zero-item order as one row
//! of NULL item columns, courtesy of the LEFT JOIN). The reduction here
//! groups rows by order id with an explicit id -> index map instead of
//! leaning on any storage-side nesting, so the behavior holds for any
//! relational backend.

use std::collections::HashMap;

use serde::Deserialize;

use crate::db::models::{OrderItemView, OrderRow, OrderStatus, OrderView, UserSummary};

/// Named status filters for vendor order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// Newly placed orders awaiting a vendor decision.
    Incoming,
    /// Accepted or on the road.
    Active,
    /// Terminal orders kept as history.
    History,
}

impl StatusFilter {
    pub fn statuses(self) -> &'static [OrderStatus] {
        match self {
            StatusFilter::Incoming => &[OrderStatus::Pending],
            StatusFilter::Active => &[OrderStatus::Confirmed, OrderStatus::Delivering],
            StatusFilter::History => &[OrderStatus::Completed, OrderStatus::Cancelled],
        }
    }
}

/// Group flat join rows into one [`OrderView`] per order.
///
/// Orders keep the arrival order of their first row and items the arrival
/// order of their rows; nothing is re-sorted here. Rows whose item columns
/// are NULL (zero-item orders under the LEFT JOIN) contribute the order
/// but no item.
pub fn group_rows(rows: Vec<OrderRow>) -> Vec<OrderView> {
    let mut views: Vec<OrderView> = Vec::new();
    let mut index: HashMap<uuid::Uuid, usize> = HashMap::new();

    for row in rows {
        let idx = match index.get(&row.id) {
            Some(&idx) => idx,
            None => {
                index.insert(row.id, views.len());
                views.push(OrderView {
                    id: row.id,
                    buyer_id: row.buyer_id,
                    vendor_id: row.vendor_id,
                    status: row.status,
                    total_price: row.total_price,
                    created_at: row.created_at,
                    buyer: UserSummary {
                        name: row.buyer_name.clone(),
                        avatar_url: row.buyer_avatar_url.clone(),
                    },
                    vendor: UserSummary {
                        name: row.vendor_name.clone(),
                        avatar_url: row.vendor_avatar_url.clone(),
                    },
                    items: Vec::new(),
                });
                views.len() - 1
            }
        };

        // Phantom row from the LEFT JOIN: the order exists with no items.
        let (Some(item_id), Some(product_id), Some(quantity), Some(price_at_order)) = (
            row.item_id,
            row.item_product_id,
            row.item_quantity,
            row.item_price_at_order,
        ) else {
            continue;
        };

        if let Some(view) = views.get_mut(idx) {
            view.items.push(OrderItemView {
                id: item_id,
                product_id,
                product_name: row.item_product_name.unwrap_or_default(),
                quantity,
                price_at_order,
            });
        }
    }

    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    struct RowBuilder {
        order_id: Uuid,
        buyer_id: Uuid,
        vendor_id: Uuid,
        status: OrderStatus,
        total_price: i64,
    }

    impl RowBuilder {
        fn new(total_price: i64) -> Self {
            Self {
                order_id: Uuid::new_v4(),
                buyer_id: Uuid::new_v4(),
                vendor_id: Uuid::new_v4(),
                status: OrderStatus::Pending,
                total_price,
            }
        }

        fn bare(&self) -> OrderRow {
            OrderRow {
                id: self.order_id,
                buyer_id: self.buyer_id,
                vendor_id: self.vendor_id,
                status: self.status,
                total_price: self.total_price,
                created_at: Utc::now(),
                buyer_name: "Budi".to_string(),
                buyer_avatar_url: None,
                vendor_name: "Warung Sari".to_string(),
                vendor_avatar_url: Some("https://cdn.test/sari.png".to_string()),
                item_id: None,
                item_product_id: None,
                item_quantity: None,
                item_price_at_order: None,
                item_product_name: None,
            }
        }

        fn with_item(&self, product_id: Uuid, name: &str, quantity: i32, price: i64) -> OrderRow {
            let mut row = self.bare();
            row.item_id = Some(Uuid::new_v4());
            row.item_product_id = Some(product_id);
            row.item_quantity = Some(quantity);
            row.item_price_at_order = Some(price);
            row.item_product_name = Some(name.to_string());
            row
        }
    }

    #[test]
    fn n_rows_become_one_order_with_n_items() {
        let order = RowBuilder::new(48000);
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let rows = vec![
            order.with_item(p1, "Sate Ayam", 1, 15000),
            order.with_item(p2, "Nasi Goreng", 1, 18000),
            // Same product tapped twice: a second row, not a summed one.
            order.with_item(p1, "Sate Ayam", 1, 15000),
        ];

        let views = group_rows(rows);
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.items.len(), 3);
        assert_eq!(view.items[0].product_name, "Sate Ayam");
        assert_eq!(view.items[1].product_name, "Nasi Goreng");
        assert_eq!(view.items[1].price_at_order, 18000);
        assert_eq!(view.items[2].product_id, p1);
        assert_eq!(view.total_price, 48000);
        assert_eq!(view.vendor.name, "Warung Sari");
    }

    #[test]
    fn phantom_rows_yield_an_empty_item_list() {
        let order = RowBuilder::new(0);
        let views = group_rows(vec![order.bare()]);
        assert_eq!(views.len(), 1);
        assert!(views[0].items.is_empty());
    }

    #[test]
    fn orders_group_in_arrival_order() {
        let newest = RowBuilder::new(10000);
        let older = RowBuilder::new(20000);
        let rows = vec![
            newest.with_item(Uuid::new_v4(), "Es Teh", 2, 5000),
            older.with_item(Uuid::new_v4(), "Bakso", 1, 20000),
            newest.bare(), // stray extra row for the first order
        ];

        let views = group_rows(rows);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, newest.order_id);
        assert_eq!(views[1].id, older.order_id);
        // The stray NULL-item row must not add a phantom item.
        assert_eq!(views[0].items.len(), 1);
    }

    #[test]
    fn interleaved_rows_still_group_by_order() {
        let a = RowBuilder::new(30000);
        let b = RowBuilder::new(12000);
        let rows = vec![
            a.with_item(Uuid::new_v4(), "Mie Ayam", 1, 12000),
            b.with_item(Uuid::new_v4(), "Gado-Gado", 1, 12000),
            a.with_item(Uuid::new_v4(), "Es Campur", 2, 9000),
        ];

        let views = group_rows(rows);
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].items.len(), 2);
        assert_eq!(views[1].items.len(), 1);
    }

    #[test]
    fn empty_input_projects_nothing() {
        assert!(group_rows(Vec::new()).is_empty());
    }

    #[test]
    fn filter_status_sets() {
        assert_eq!(StatusFilter::Incoming.statuses(), &[OrderStatus::Pending]);
        assert_eq!(
            StatusFilter::Active.statuses(),
            &[OrderStatus::Confirmed, OrderStatus::Delivering]
        );
        assert_eq!(
            StatusFilter::History.statuses(),
            &[OrderStatus::Completed, OrderStatus::Cancelled]
        );
    }
}
