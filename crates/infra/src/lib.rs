//! Infrastructure layer: configuration, SQLite pool + schema, repositories.

pub mod config;
pub mod db;
pub mod repository;

pub use config::{ConfigError, StorefrontConfig};
pub use repository::{
    Repository, RepositoryError, SqliteCustomerRepository, SqliteOrderRepository,
    SqliteProductRepository,
};
