//! SQLite connection pool and schema.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use crate::StorefrontConfig;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id            TEXT PRIMARY KEY NOT NULL,
        name          TEXT NOT NULL,
        street        TEXT NULL,
        number        INTEGER NULL,
        zipcode       TEXT NULL,
        city          TEXT NULL,
        active        BOOLEAN NOT NULL,
        reward_points INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id    TEXT PRIMARY KEY NOT NULL,
        name  TEXT NOT NULL,
        price INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id          TEXT PRIMARY KEY NOT NULL,
        customer_id TEXT NOT NULL REFERENCES customers (id),
        total       INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id         TEXT PRIMARY KEY NOT NULL,
        product_id TEXT NOT NULL REFERENCES products (id),
        order_id   TEXT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        quantity   INTEGER NOT NULL,
        name       TEXT NOT NULL,
        price      INTEGER NOT NULL
    )
    "#,
];

/// Open a pool for `config`.
///
/// Idle connections are never reaped: an in-memory database lives only as
/// long as one of its connections does.
pub async fn connect(config: &StorefrontConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!(
        database_url = %config.database_url,
        max_connections = config.max_connections,
        "opening database pool"
    );
    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
}

/// Create the tables if they do not exist yet.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA.iter().copied() {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(tables = SCHEMA.len(), "schema ready");
    Ok(())
}

/// In-memory pool with the schema applied (tests/dev).
pub async fn in_memory() -> Result<SqlitePool, sqlx::Error> {
    let pool = connect(&StorefrontConfig::default()).await?;
    migrate(&pool).await?;
    Ok(pool)
}
