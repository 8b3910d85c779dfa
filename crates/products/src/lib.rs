//! Products domain module.
//!
//! Catalog entries that order lines are priced from. Pure domain logic.

pub mod product;

pub use product::Product;
