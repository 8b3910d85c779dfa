use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use storefront_checkout::{Order, OrderItem};
use storefront_core::{CustomerId, Entity, OrderId, OrderItemId, ProductId};

use super::{Repository, RepositoryError, from_column, map_insert_error, to_column};

const ENTITY: &str = "Order";

/// SQLite-backed order repository (`orders` + `order_items` tables).
///
/// An order and its items are written in one transaction; `update` replaces
/// the full item list.
#[derive(Debug, Clone)]
pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_items(
    tx: &mut Transaction<'_, Sqlite>,
    order: &Order,
) -> Result<(), RepositoryError> {
    for item in order.items() {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, product_id, order_id, quantity, name, price)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(item.id().as_str())
        .bind(item.product_id().as_str())
        .bind(order.id().as_str())
        .bind(i64::from(item.quantity()))
        .bind(item.name())
        .bind(to_column("price", item.price())?)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_insert_error("OrderItem", e))?;
    }
    Ok(())
}

fn item_from_row(row: &SqliteRow) -> Result<OrderItem, RepositoryError> {
    Ok(OrderItem::new(
        OrderItemId::new(row.try_get::<String, _>("id")?)?,
        row.try_get::<String, _>("name")?,
        from_column("price", row.try_get("price")?)?,
        ProductId::new(row.try_get::<String, _>("product_id")?)?,
        from_column("quantity", row.try_get("quantity")?)?,
    )?)
}

fn order_from_row(row: &SqliteRow, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
    Ok(Order::new(
        OrderId::new(row.try_get::<String, _>("id")?)?,
        CustomerId::new(row.try_get::<String, _>("customer_id")?)?,
        items,
    )?)
}

#[async_trait::async_trait]
impl Repository<Order> for SqliteOrderRepository {
    async fn create(&self, entity: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES (?1, ?2, ?3)")
            .bind(entity.id().as_str())
            .bind(entity.customer_id().as_str())
            .bind(to_column("total", entity.total())?)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_insert_error(ENTITY, e))?;
        insert_items(&mut tx, entity).await?;

        tx.commit().await?;
        tracing::debug!(
            order_id = %entity.id(),
            items = entity.items().len(),
            total = entity.total(),
            "order created"
        );
        Ok(())
    }

    async fn update(&self, entity: &Order) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE orders SET customer_id = ?2, total = ?3 WHERE id = ?1")
            .bind(entity.id().as_str())
            .bind(entity.customer_id().as_str())
            .bind(to_column("total", entity.total())?)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(ENTITY));
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
            .bind(entity.id().as_str())
            .execute(&mut *tx)
            .await?;
        insert_items(&mut tx, entity).await?;

        tx.commit().await?;
        tracing::debug!(
            order_id = %entity.id(),
            items = entity.items().len(),
            total = entity.total(),
            "order updated"
        );
        Ok(())
    }

    async fn find(&self, id: &OrderId) -> Result<Order, RepositoryError> {
        let row = sqlx::query("SELECT id, customer_id FROM orders WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(ENTITY))?;

        let items = sqlx::query(
            r#"
            SELECT id, product_id, quantity, name, price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(item_from_row)
        .collect::<Result<Vec<_>, _>>()?;

        order_from_row(&row, items)
    }

    async fn find_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query("SELECT id, customer_id FROM orders ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        let item_rows = sqlx::query(
            "SELECT id, order_id, product_id, quantity, name, price FROM order_items ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
        for row in &item_rows {
            let order_id: String = row.try_get("order_id")?;
            items_by_order
                .entry(order_id)
                .or_default()
                .push(item_from_row(row)?);
        }

        order_rows
            .iter()
            .map(|row| {
                let order_id: String = row.try_get("id")?;
                let items = items_by_order.remove(&order_id).unwrap_or_default();
                order_from_row(row, items)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::repository::{SqliteCustomerRepository, SqliteProductRepository};
    use sqlx::Row;
    use storefront_customer::{Address, Customer};
    use storefront_products::Product;

    struct Fixture {
        pool: SqlitePool,
        orders: SqliteOrderRepository,
        products: SqliteProductRepository,
        customer: Customer,
    }

    async fn fixture() -> Fixture {
        let pool = db::in_memory().await.unwrap();
        let customers = SqliteCustomerRepository::new(pool.clone());
        let mut customer = Customer::new(CustomerId::new("1").unwrap(), "Customer One").unwrap();
        customer.change_address(Address::new("Street One", 101, "14021000", "City One").unwrap());
        customers.create(&customer).await.unwrap();

        Fixture {
            orders: SqliteOrderRepository::new(pool.clone()),
            products: SqliteProductRepository::new(pool.clone()),
            pool,
            customer,
        }
    }

    impl Fixture {
        async fn product(&self, id: &str, name: &str, price: u64) -> Product {
            let product = Product::new(ProductId::new(id).unwrap(), name, price).unwrap();
            self.products.create(&product).await.unwrap();
            product
        }

        async fn stored_items(&self, order_id: &str) -> Vec<(String, String, i64, i64)> {
            sqlx::query(
                "SELECT id, product_id, quantity, price FROM order_items WHERE order_id = ?1 ORDER BY rowid",
            )
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .unwrap()
            .iter()
            .map(|r| (r.get("id"), r.get("product_id"), r.get("quantity"), r.get("price")))
            .collect()
        }

        async fn stored_total(&self, order_id: &str) -> i64 {
            sqlx::query("SELECT total FROM orders WHERE id = ?1")
                .bind(order_id)
                .fetch_one(&self.pool)
                .await
                .unwrap()
                .get("total")
        }
    }

    fn item(id: &str, product: &Product, quantity: u32) -> OrderItem {
        OrderItem::new(
            OrderItemId::new(id).unwrap(),
            product.name(),
            product.price(),
            product.id().clone(),
            quantity,
        )
        .unwrap()
    }

    fn order(id: &str, customer: &Customer, items: Vec<OrderItem>) -> Order {
        Order::new(OrderId::new(id).unwrap(), customer.id().clone(), items).unwrap()
    }

    #[tokio::test]
    async fn create_persists_order_and_items() {
        let fx = fixture().await;
        let product = fx.product("123", "Product One", 10).await;
        let order = order("123", &fx.customer, vec![item("1", &product, 2)]);

        fx.orders.create(&order).await.unwrap();

        assert_eq!(fx.stored_total("123").await, 20);
        assert_eq!(
            fx.stored_items("123").await,
            vec![("1".to_string(), "123".to_string(), 2, 10)]
        );
    }

    #[tokio::test]
    async fn update_replaces_items_and_total() {
        let fx = fixture().await;
        let product_one = fx.product("123", "Product One", 10).await;
        let mut order = order("12", &fx.customer, vec![item("1", &product_one, 2)]);
        fx.orders.create(&order).await.unwrap();

        let product_two = fx.product("146", "Product Two", 20).await;
        order
            .change_items(vec![item("1", &product_one, 2), item("2", &product_two, 3)])
            .unwrap();
        fx.orders.update(&order).await.unwrap();

        assert_eq!(fx.stored_total("12").await, 80);
        assert_eq!(
            fx.stored_items("12").await,
            vec![
                ("1".to_string(), "123".to_string(), 2, 10),
                ("2".to_string(), "146".to_string(), 3, 20),
            ]
        );
        assert_eq!(fx.orders.find(order.id()).await.unwrap(), order);
    }

    #[tokio::test]
    async fn find_reconstitutes_order_with_items() {
        let fx = fixture().await;
        let product = fx.product("123", "Product One", 10).await;
        let order = order("12", &fx.customer, vec![item("1", &product, 2)]);
        fx.orders.create(&order).await.unwrap();

        let found = fx.orders.find(order.id()).await.unwrap();

        assert_eq!(found, order);
        assert_eq!(found.customer_id(), fx.customer.id());
        assert_eq!(found.total(), 20);
        assert_eq!(found.items()[0].product_id().as_str(), "123");
    }

    #[tokio::test]
    async fn find_missing_order_fails_with_not_found() {
        let fx = fixture().await;
        let err = fx.orders.find(&OrderId::new("ABC").unwrap()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound("Order")));
        assert_eq!(err.to_string(), "Order not found");
    }

    #[tokio::test]
    async fn update_missing_order_fails_with_not_found() {
        let fx = fixture().await;
        let product = fx.product("123", "Product One", 10).await;
        let order = order("missing", &fx.customer, vec![item("1", &product, 1)]);
        let err = fx.orders.update(&order).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound("Order")));
    }

    #[tokio::test]
    async fn create_rolls_back_when_an_item_fails() {
        let fx = fixture().await;
        let product = fx.product("123", "Product One", 10).await;
        let ghost = Product::new(ProductId::new("999").unwrap(), "Not stored", 1).unwrap();
        let order = order(
            "12",
            &fx.customer,
            vec![item("1", &product, 1), item("2", &ghost, 1)],
        );

        assert!(fx.orders.create(&order).await.is_err());
        let err = fx.orders.find(order.id()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound("Order")));
    }

    #[tokio::test]
    async fn find_all_returns_every_order() {
        let fx = fixture().await;
        let product_one = fx.product("123", "Product One", 10).await;
        let product_two = fx.product("246", "Product Two", 20).await;

        let order_one = order("12", &fx.customer, vec![item("1", &product_one, 2)]);
        let order_two = order("24", &fx.customer, vec![item("2", &product_two, 3)]);
        fx.orders.create(&order_one).await.unwrap();
        fx.orders.create(&order_two).await.unwrap();

        let found = fx.orders.find_all().await.unwrap();

        assert_eq!(found.len(), 2);
        assert!(found.contains(&order_one));
        assert!(found.contains(&order_two));
    }
}
