use std::sync::{Arc, Mutex};

use storefront_app::{CustomerService, ServiceError, register_logging_handlers};
use storefront_core::{CustomerId, Entity};
use storefront_customer::{Address, CustomerCreatedEvent, CustomerUpdatedEvent};
use storefront_events::{DomainEvent, EventDispatcher, EventHandler, SharedHandler};
use storefront_infra::{Repository, SqliteCustomerRepository, db};

#[derive(Default)]
struct Journal {
    entries: Mutex<Vec<String>>,
}

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }
}

impl EventHandler<CustomerCreatedEvent> for Journal {
    fn handle(&self, event: &CustomerCreatedEvent) {
        self.entries
            .lock()
            .unwrap()
            .push(format!("created:{}", event.event_data().name));
    }
}

impl EventHandler<CustomerUpdatedEvent> for Journal {
    fn handle(&self, event: &CustomerUpdatedEvent) {
        let data = event.event_data();
        self.entries
            .lock()
            .unwrap()
            .push(format!("updated:{}:{}", data.id, data.address));
    }
}

async fn service_with_journal() -> (CustomerService<SqliteCustomerRepository>, Arc<Journal>) {
    let pool = db::in_memory().await.unwrap();
    let journal = Arc::new(Journal::default());
    let created: SharedHandler<CustomerCreatedEvent> = journal.clone();
    let updated: SharedHandler<CustomerUpdatedEvent> = journal.clone();

    let mut dispatcher = EventDispatcher::new();
    register_logging_handlers(&mut dispatcher);
    dispatcher.register(CustomerCreatedEvent::EVENT_NAME, created);
    dispatcher.register(CustomerUpdatedEvent::EVENT_NAME, updated);

    (
        CustomerService::new(SqliteCustomerRepository::new(pool), dispatcher),
        journal,
    )
}

fn address() -> Address {
    Address::new("Street One", 101, "14021000", "City One").unwrap()
}

#[tokio::test]
async fn create_customer_persists_then_notifies() {
    let (service, journal) = service_with_journal().await;

    let customer = service
        .create_customer(CustomerId::new("1").unwrap(), "Customer One")
        .await
        .unwrap();

    let stored = service.repository().find(customer.id()).await.unwrap();
    assert_eq!(stored, customer);
    assert_eq!(journal.entries(), vec!["created:Customer One"]);
}

#[tokio::test]
async fn change_address_persists_then_notifies_with_payload() {
    let (service, journal) = service_with_journal().await;
    let id = CustomerId::new("1").unwrap();
    service.create_customer(id.clone(), "Customer One").await.unwrap();

    let customer = service.change_address(&id, address()).await.unwrap();

    assert_eq!(customer.address(), Some(&address()));
    let stored = service.repository().find(&id).await.unwrap();
    assert_eq!(stored.address(), Some(&address()));
    assert_eq!(
        journal.entries(),
        vec![
            "created:Customer One".to_string(),
            "updated:1:Street One, 101, 14021000 City One".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_write_raises_no_event() {
    let (service, journal) = service_with_journal().await;
    let id = CustomerId::new("1").unwrap();
    service.create_customer(id.clone(), "Customer One").await.unwrap();

    let err = service.create_customer(id, "Customer One").await.unwrap_err();
    assert!(matches!(err, ServiceError::Repository(_)));

    let err = service
        .change_address(&CustomerId::new("missing").unwrap(), address())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(journal.entries(), vec!["created:Customer One"]);
}

#[tokio::test]
async fn invalid_customer_is_rejected_before_storage() {
    let (service, journal) = service_with_journal().await;

    let err = service
        .create_customer(CustomerId::new("1").unwrap(), " ")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Domain(_)));
    assert!(service.repository().find_all().await.unwrap().is_empty());
    assert!(journal.entries().is_empty());
}

#[tokio::test]
async fn unregistering_all_handlers_silences_the_service() {
    let (mut service, journal) = service_with_journal().await;
    service.dispatcher_mut().unregister_all();

    service
        .create_customer(CustomerId::new("1").unwrap(), "Customer One")
        .await
        .unwrap();

    assert!(service.dispatcher().event_handlers().is_empty());
    assert!(journal.entries().is_empty());
}

#[tokio::test]
async fn demo_scenario_places_an_order() {
    let pool = db::in_memory().await.unwrap();

    let order = storefront_app::demo::run(&pool).await.unwrap();

    assert_eq!(order.items().len(), 2);
    assert_eq!(order.total(), 10 * 2 + 20 * 3);
    let customers = SqliteCustomerRepository::new(pool);
    let all = customers.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].address(), Some(&address()));
}
