use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use storefront_core::{CustomerId, Entity};
use storefront_customer::{Address, Customer};

use super::{Repository, RepositoryError, from_column, map_insert_error, to_column};

const ENTITY: &str = "Customer";

/// SQLite-backed customer repository (`customers` table).
#[derive(Debug, Clone)]
pub struct SqliteCustomerRepository {
    pool: SqlitePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

struct AddressColumns<'a> {
    street: Option<&'a str>,
    number: Option<i64>,
    zip: Option<&'a str>,
    city: Option<&'a str>,
}

impl<'a> AddressColumns<'a> {
    fn of(customer: &'a Customer) -> Self {
        let address = customer.address();
        Self {
            street: address.map(Address::street),
            number: address.map(|a| i64::from(a.number())),
            zip: address.map(Address::zip),
            city: address.map(Address::city),
        }
    }
}

fn customer_from_row(row: &SqliteRow) -> Result<Customer, RepositoryError> {
    let id = CustomerId::new(row.try_get::<String, _>("id")?)?;
    let mut customer = Customer::new(id, row.try_get::<String, _>("name")?)?;

    let street: Option<String> = row.try_get("street")?;
    let number: Option<i64> = row.try_get("number")?;
    let zip: Option<String> = row.try_get("zipcode")?;
    let city: Option<String> = row.try_get("city")?;
    if let (Some(street), Some(number), Some(zip), Some(city)) = (street, number, zip, city) {
        let number = from_column::<u32>("number", number)?;
        customer.change_address(Address::new(street, number, zip, city)?);
    }

    if row.try_get::<bool, _>("active")? {
        customer.activate()?;
    }
    customer.add_reward_points(from_column::<u64>(
        "reward_points",
        row.try_get("reward_points")?,
    )?)?;

    Ok(customer)
}

#[async_trait::async_trait]
impl Repository<Customer> for SqliteCustomerRepository {
    async fn create(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let address = AddressColumns::of(entity);
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(entity.id().as_str())
        .bind(entity.name())
        .bind(address.street)
        .bind(address.number)
        .bind(address.zip)
        .bind(address.city)
        .bind(entity.is_active())
        .bind(to_column("reward_points", entity.reward_points())?)
        .execute(&self.pool)
        .await
        .map_err(|e| map_insert_error(ENTITY, e))?;

        tracing::debug!(customer_id = %entity.id(), "customer created");
        Ok(())
    }

    async fn update(&self, entity: &Customer) -> Result<(), RepositoryError> {
        let address = AddressColumns::of(entity);
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = ?2, street = ?3, number = ?4, zipcode = ?5, city = ?6,
                active = ?7, reward_points = ?8
            WHERE id = ?1
            "#,
        )
        .bind(entity.id().as_str())
        .bind(entity.name())
        .bind(address.street)
        .bind(address.number)
        .bind(address.zip)
        .bind(address.city)
        .bind(entity.is_active())
        .bind(to_column("reward_points", entity.reward_points())?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(ENTITY));
        }
        tracing::debug!(customer_id = %entity.id(), "customer updated");
        Ok(())
    }

    async fn find(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        let row = sqlx::query("SELECT * FROM customers WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(ENTITY))?;
        customer_from_row(&row)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM customers ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(customer_from_row).collect()
    }
}
