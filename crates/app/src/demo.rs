//! End-to-end scenario run by the `storefront` binary.

use sqlx::SqlitePool;

use storefront_checkout::{Order, OrderItem};
use storefront_core::{CustomerId, Entity, OrderId, OrderItemId, ProductId};
use storefront_customer::Address;
use storefront_events::EventDispatcher;
use storefront_infra::{
    Repository, SqliteCustomerRepository, SqliteOrderRepository, SqliteProductRepository,
};
use storefront_products::Product;

use crate::{CustomerService, register_logging_handlers};

/// Create a customer, move them, and place an order for two products.
///
/// Returns the order as read back from storage.
pub async fn run(pool: &SqlitePool) -> anyhow::Result<Order> {
    let mut dispatcher = EventDispatcher::new();
    register_logging_handlers(&mut dispatcher);
    tracing::debug!(?dispatcher, "dispatcher ready");

    let customers = CustomerService::new(SqliteCustomerRepository::new(pool.clone()), dispatcher);
    let customer = customers
        .create_customer(CustomerId::generate(), "Customer One")
        .await?;
    customers
        .change_address(
            customer.id(),
            Address::new("Street One", 101, "14021000", "City One")?,
        )
        .await?;

    let products = SqliteProductRepository::new(pool.clone());
    let product_one = Product::new(ProductId::generate(), "Product One", 10)?;
    let product_two = Product::new(ProductId::generate(), "Product Two", 20)?;
    products.create(&product_one).await?;
    products.create(&product_two).await?;

    let items = [(&product_one, 2), (&product_two, 3)]
        .into_iter()
        .map(|(product, quantity)| {
            OrderItem::new(
                OrderItemId::generate(),
                product.name(),
                product.price(),
                product.id().clone(),
                quantity,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    let order = Order::new(OrderId::generate(), customer.id().clone(), items)?;

    let orders = SqliteOrderRepository::new(pool.clone());
    orders.create(&order).await?;

    let stored = orders.find(order.id()).await?;
    tracing::info!(
        order_id = %stored.id(),
        customer_id = %stored.customer_id(),
        items = stored.items().len(),
        total = stored.total(),
        "order placed"
    );
    Ok(stored)
}
