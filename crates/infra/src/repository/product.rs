use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use storefront_core::{Entity, ProductId};
use storefront_products::Product;

use super::{Repository, RepositoryError, from_column, map_insert_error, to_column};

const ENTITY: &str = "Product";

/// SQLite-backed product repository (`products` table).
#[derive(Debug, Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &SqliteRow) -> Result<Product, RepositoryError> {
    Ok(Product::new(
        ProductId::new(row.try_get::<String, _>("id")?)?,
        row.try_get::<String, _>("name")?,
        from_column("price", row.try_get("price")?)?,
    )?)
}

#[async_trait::async_trait]
impl Repository<Product> for SqliteProductRepository {
    async fn create(&self, entity: &Product) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES (?1, ?2, ?3)")
            .bind(entity.id().as_str())
            .bind(entity.name())
            .bind(to_column("price", entity.price())?)
            .execute(&self.pool)
            .await
            .map_err(|e| map_insert_error(ENTITY, e))?;

        tracing::debug!(product_id = %entity.id(), "product created");
        Ok(())
    }

    async fn update(&self, entity: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = ?2, price = ?3 WHERE id = ?1")
            .bind(entity.id().as_str())
            .bind(entity.name())
            .bind(to_column("price", entity.price())?)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(ENTITY));
        }
        tracing::debug!(product_id = %entity.id(), "product updated");
        Ok(())
    }

    async fn find(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound(ENTITY))?;
        product_from_row(&row)
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(product_from_row).collect()
    }
}
