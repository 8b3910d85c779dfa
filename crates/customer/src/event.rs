//! Customer domain events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::CustomerId;
use storefront_events::DomainEvent;

use crate::{Address, Customer};

/// Payload of `CustomerCreatedEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub name: String,
}

/// Event: a customer was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreatedEvent {
    event_data: CustomerCreated,
    date_time_occurred: DateTime<Utc>,
}

impl CustomerCreatedEvent {
    pub fn new(event_data: CustomerCreated) -> Self {
        Self {
            event_data,
            date_time_occurred: Utc::now(),
        }
    }
}

impl From<&Customer> for CustomerCreatedEvent {
    fn from(customer: &Customer) -> Self {
        Self::new(CustomerCreated {
            name: customer.name().to_string(),
        })
    }
}

impl DomainEvent for CustomerCreatedEvent {
    type Data = CustomerCreated;
    const EVENT_NAME: &'static str = "CustomerCreatedEvent";

    fn event_data(&self) -> &CustomerCreated {
        &self.event_data
    }

    fn date_time_occurred(&self) -> DateTime<Utc> {
        self.date_time_occurred
    }
}

/// Payload of `CustomerUpdatedEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdated {
    pub id: CustomerId,
    pub name: String,
    pub address: Address,
}

/// Event: a customer's address changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdatedEvent {
    event_data: CustomerUpdated,
    date_time_occurred: DateTime<Utc>,
}

impl CustomerUpdatedEvent {
    pub fn new(event_data: CustomerUpdated) -> Self {
        Self {
            event_data,
            date_time_occurred: Utc::now(),
        }
    }
}

impl DomainEvent for CustomerUpdatedEvent {
    type Data = CustomerUpdated;
    const EVENT_NAME: &'static str = "CustomerUpdatedEvent";

    fn event_data(&self) -> &CustomerUpdated {
        &self.event_data
    }

    fn date_time_occurred(&self) -> DateTime<Utc> {
        self.date_time_occurred
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::Entity;

    #[test]
    fn created_event_is_named_and_timestamped_at_construction() {
        let before = Utc::now();
        let event = CustomerCreatedEvent::new(CustomerCreated {
            name: "Customer One".to_string(),
        });
        let after = Utc::now();

        assert_eq!(event.event_name(), "CustomerCreatedEvent");
        assert_eq!(event.event_data().name, "Customer One");
        assert!(event.date_time_occurred() >= before);
        assert!(event.date_time_occurred() <= after);
    }

    #[test]
    fn created_event_from_customer_carries_name() {
        let customer =
            Customer::new(CustomerId::new("1").unwrap(), "Customer One").unwrap();
        let event = CustomerCreatedEvent::from(&customer);
        assert_eq!(event.event_data().name, customer.name());
        assert_eq!(customer.id().as_str(), "1");
    }

    #[test]
    fn updated_event_serializes_structured_address() {
        let event = CustomerUpdatedEvent::new(CustomerUpdated {
            id: CustomerId::new("1").unwrap(),
            name: "Customer One".to_string(),
            address: Address::new("Street One", 101, "14021000", "City One").unwrap(),
        });
        assert_eq!(event.event_name(), "CustomerUpdatedEvent");

        let json = serde_json::to_value(event.event_data()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "Customer One",
                "address": {
                    "street": "Street One",
                    "number": 101,
                    "zip": "14021000",
                    "city": "City One"
                }
            })
        );
    }
}
