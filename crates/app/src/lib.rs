//! Application layer: use cases that persist aggregates and raise domain
//! events about them.

pub mod demo;
pub mod errors;
pub mod services;

pub use errors::ServiceError;
pub use services::{CustomerService, register_logging_handlers};
