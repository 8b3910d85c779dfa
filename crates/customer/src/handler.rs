//! Handlers observing customer events.
//!
//! These only log; they exist to show several observers fanning out from one
//! event and an observer reading a structured payload.

use storefront_events::{DomainEvent, EventHandler};

use crate::{CustomerCreatedEvent, CustomerUpdatedEvent};

/// Logs the creation of a customer (first observer).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFirstWhenCustomerIsCreated;

impl EventHandler<CustomerCreatedEvent> for LogFirstWhenCustomerIsCreated {
    fn handle(&self, event: &CustomerCreatedEvent) {
        tracing::info!(
            customer_name = %event.event_data().name,
            occurred_at = %event.date_time_occurred(),
            "first handler: customer created"
        );
    }
}

/// Logs the creation of a customer (second observer).
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSecondWhenCustomerIsCreated;

impl EventHandler<CustomerCreatedEvent> for LogSecondWhenCustomerIsCreated {
    fn handle(&self, event: &CustomerCreatedEvent) {
        tracing::info!(
            customer_name = %event.event_data().name,
            occurred_at = %event.date_time_occurred(),
            "second handler: customer created"
        );
    }
}

/// Logs a customer's new address.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogWhenAddressIsChanged;

impl EventHandler<CustomerUpdatedEvent> for LogWhenAddressIsChanged {
    fn handle(&self, event: &CustomerUpdatedEvent) {
        let data = event.event_data();
        tracing::info!(
            customer_id = %data.id,
            customer_name = %data.name,
            address = %data.address,
            "customer address changed"
        );
    }
}
