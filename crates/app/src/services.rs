//! Customer use cases.
//!
//! Events are raised only after the repository write succeeded.

use std::sync::Arc;

use storefront_core::{CustomerId, Entity};
use storefront_customer::{
    Address, Customer, CustomerCreatedEvent, CustomerUpdated, CustomerUpdatedEvent,
    LogFirstWhenCustomerIsCreated, LogSecondWhenCustomerIsCreated, LogWhenAddressIsChanged,
};
use storefront_events::{DomainEvent, EventDispatcher, SharedHandler};
use storefront_infra::Repository;

use crate::ServiceError;

/// Register the customer logging handlers on `dispatcher`.
pub fn register_logging_handlers(dispatcher: &mut EventDispatcher) {
    let first: SharedHandler<CustomerCreatedEvent> = Arc::new(LogFirstWhenCustomerIsCreated);
    let second: SharedHandler<CustomerCreatedEvent> = Arc::new(LogSecondWhenCustomerIsCreated);
    let address: SharedHandler<CustomerUpdatedEvent> = Arc::new(LogWhenAddressIsChanged);

    dispatcher.register(CustomerCreatedEvent::EVENT_NAME, first);
    dispatcher.register(CustomerCreatedEvent::EVENT_NAME, second);
    dispatcher.register(CustomerUpdatedEvent::EVENT_NAME, address);
}

pub struct CustomerService<R> {
    repository: R,
    dispatcher: EventDispatcher,
}

impl<R> CustomerService<R>
where
    R: Repository<Customer>,
{
    pub fn new(repository: R, dispatcher: EventDispatcher) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Persist a new customer, then raise `CustomerCreatedEvent`.
    pub async fn create_customer(
        &self,
        id: CustomerId,
        name: &str,
    ) -> Result<Customer, ServiceError> {
        let customer = Customer::new(id, name)?;
        self.repository.create(&customer).await?;

        self.dispatcher.notify(&CustomerCreatedEvent::from(&customer));
        Ok(customer)
    }

    /// Move a customer to `address`, persist, then raise `CustomerUpdatedEvent`.
    pub async fn change_address(
        &self,
        id: &CustomerId,
        address: Address,
    ) -> Result<Customer, ServiceError> {
        let mut customer = self.repository.find(id).await?;
        customer.change_address(address.clone());
        self.repository.update(&customer).await?;

        self.dispatcher.notify(&CustomerUpdatedEvent::new(CustomerUpdated {
            id: customer.id().clone(),
            name: customer.name().to_string(),
            address,
        }));
        Ok(customer)
    }
}
