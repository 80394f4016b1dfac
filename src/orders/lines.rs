//! Line-item validation and pricing.
//!
//! The aggregation engine batch-fetches the referenced products, then runs
//! every requested line through [`price_lines`] before touching the orders
//! table. Validation failures abort the whole placement.

use std::collections::HashMap;

use uuid::Uuid;

use super::error::OrderError;
use crate::db::models::Product;

/// One requested purchase line, as submitted by the buyer.
#[derive(Debug, Clone, Copy)]
pub struct LineItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// A validated line with its price snapshot taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Product price at purchase time; frozen even if the catalog price
    /// later changes.
    pub price_at_order: i64,
}

/// Validate requested lines against the fetched products and compute the
/// total the placement adds to the cart.
///
/// Fails with [`OrderError::ProductNotFound`] for an unresolved product id
/// and [`OrderError::InvalidLineItem`] for a product owned by a different
/// vendor (one order never spans vendors) or one not currently for sale.
pub fn price_lines(
    vendor_id: Uuid,
    items: &[LineItemRequest],
    products: &HashMap<Uuid, Product>,
) -> Result<(Vec<PricedLine>, i64), OrderError> {
    let mut lines = Vec::with_capacity(items.len());
    let mut new_items_total: i64 = 0;

    for item in items {
        let product = products
            .get(&item.product_id)
            .ok_or(OrderError::ProductNotFound(item.product_id))?;

        if product.vendor_id != vendor_id {
            return Err(OrderError::InvalidLineItem(format!(
                "product {} belongs to another vendor",
                product.id
            )));
        }
        if !product.is_available {
            return Err(OrderError::InvalidLineItem(format!(
                "product {} is not available",
                product.id
            )));
        }

        new_items_total += product.price * i64::from(item.quantity);
        lines.push(PricedLine {
            product_id: product.id,
            quantity: item.quantity,
            price_at_order: product.price,
        });
    }

    Ok((lines, new_items_total))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(vendor_id: Uuid, price: i64, available: bool) -> Product {
        Product {
            id: Uuid::new_v4(),
            vendor_id,
            name: "Sate Ayam".to_string(),
            price,
            is_available: available,
        }
    }

    fn catalog(products: &[Product]) -> HashMap<Uuid, Product> {
        products.iter().map(|p| (p.id, p.clone())).collect()
    }

    #[test]
    fn prices_and_totals_lines() {
        let vendor = Uuid::new_v4();
        let p1 = product(vendor, 15000, true);
        let p2 = product(vendor, 18000, true);
        let products = catalog(&[p1.clone(), p2.clone()]);

        let items = [
            LineItemRequest {
                product_id: p1.id,
                quantity: 2,
            },
            LineItemRequest {
                product_id: p2.id,
                quantity: 1,
            },
        ];

        let (lines, total) = price_lines(vendor, &items, &products).unwrap();
        assert_eq!(total, 2 * 15000 + 18000);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].price_at_order, 15000);
        assert_eq!(lines[1].price_at_order, 18000);
    }

    #[test]
    fn unknown_product_is_rejected() {
        let vendor = Uuid::new_v4();
        let products = catalog(&[product(vendor, 1000, true)]);
        let ghost = Uuid::new_v4();

        let err = price_lines(
            vendor,
            &[LineItemRequest {
                product_id: ghost,
                quantity: 1,
            }],
            &products,
        )
        .unwrap_err();

        assert!(matches!(err, OrderError::ProductNotFound(id) if id == ghost));
    }

    #[test]
    fn cross_vendor_product_is_rejected() {
        let vendor = Uuid::new_v4();
        let other_vendor = Uuid::new_v4();
        let foreign = product(other_vendor, 5000, true);
        let products = catalog(&[foreign.clone()]);

        let err = price_lines(
            vendor,
            &[LineItemRequest {
                product_id: foreign.id,
                quantity: 1,
            }],
            &products,
        )
        .unwrap_err();

        assert!(matches!(err, OrderError::InvalidLineItem(_)));
    }

    #[test]
    fn unavailable_product_is_rejected() {
        let vendor = Uuid::new_v4();
        let sold_out = product(vendor, 5000, false);
        let products = catalog(&[sold_out.clone()]);

        let err = price_lines(
            vendor,
            &[LineItemRequest {
                product_id: sold_out.id,
                quantity: 3,
            }],
            &products,
        )
        .unwrap_err();

        assert!(matches!(err, OrderError::InvalidLineItem(_)));
    }

    /// One bad line poisons the whole request; earlier valid lines do not
    /// survive it.
    #[test]
    fn any_bad_line_fails_the_batch() {
        let vendor = Uuid::new_v4();
        let good = product(vendor, 7000, true);
        let products = catalog(&[good.clone()]);

        let items = [
            LineItemRequest {
                product_id: good.id,
                quantity: 1,
            },
            LineItemRequest {
                product_id: Uuid::new_v4(),
                quantity: 1,
            },
        ];

        assert!(price_lines(vendor, &items, &products).is_err());
    }

    /// The merge scenario from the buyer flow: 15000 then 18000 from the
    /// same vendor adds up to 33000 across the two placements.
    #[test]
    fn sequential_placements_sum() {
        let vendor = Uuid::new_v4();
        let p1 = product(vendor, 15000, true);
        let p2 = product(vendor, 18000, true);
        let products = catalog(&[p1.clone(), p2.clone()]);

        let (_, first) = price_lines(
            vendor,
            &[LineItemRequest {
                product_id: p1.id,
                quantity: 1,
            }],
            &products,
        )
        .unwrap();
        let (_, second) = price_lines(
            vendor,
            &[LineItemRequest {
                product_id: p2.id,
                quantity: 1,
            }],
            &products,
        )
        .unwrap();

        assert_eq!(first, 15000);
        assert_eq!(first + second, 33000);
    }
}
