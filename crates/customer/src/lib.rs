//! Customer domain module.
//!
//! Business rules for customers (identity, address, activation, reward
//! points) plus the domain events raised around them and the handlers that
//! observe those events. Pure domain logic: no IO, no storage.

pub mod address;
pub mod customer;
pub mod event;
pub mod handler;

pub use address::Address;
pub use customer::Customer;
pub use event::{
    CustomerCreated, CustomerCreatedEvent, CustomerUpdated, CustomerUpdatedEvent,
};
pub use handler::{
    LogFirstWhenCustomerIsCreated, LogSecondWhenCustomerIsCreated, LogWhenAddressIsChanged,
};
