//! Repository Layer
//!
//! One repository per aggregate, each owning its SQL. Every multi-step
//! write runs inside a single transaction; failures roll the whole
//! operation back.

mod order;
mod product;

pub use order::OrderRepository;
pub use product::ProductRepository;
