//! Database Models
//!
//! Row types and API-facing view shapes, one file per aggregate.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Order, OrderItemView, OrderRow, OrderStatus, OrderView};
pub use product::{Product, ProductRow, ProductView};
pub use user::UserSummary;
