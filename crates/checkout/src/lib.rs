//! Checkout domain module (orders and their line items).
//!
//! Pure domain logic: an order references its customer and products by id
//! only, and derives its total from its items.

pub mod order;

pub use order::{Order, OrderItem};
