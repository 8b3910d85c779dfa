//! Repositories: persistence of whole aggregates.
//!
//! Each repository stores one aggregate type and hands back fully
//! reconstituted domain entities (orders come back with their items).

pub mod customer;
pub mod order;
pub mod product;

pub use customer::SqliteCustomerRepository;
pub use order::SqliteOrderRepository;
pub use product::SqliteProductRepository;

use storefront_core::{DomainError, Entity};
use thiserror::Error;

/// Repository operation error.
///
/// `NotFound` is the only condition callers are expected to branch on; the
/// rest are storage failures or rows that no longer satisfy the domain rules.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No row for the requested id (e.g. "Order not found").
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A row with the same id already exists.
    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    /// A value does not fit the storage column (SQLite integers are signed 64-bit).
    #[error("{0} out of range for storage")]
    OutOfRange(&'static str),

    /// A stored row failed domain validation while being reconstituted.
    #[error("stored row is invalid: {0}")]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence contract for one aggregate type.
#[async_trait::async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Entity + Send + Sync,
{
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Fails with `RepositoryError::NotFound` when no row has this id.
    async fn find(&self, id: &T::Id) -> Result<T, RepositoryError>;

    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}

/// Map an insert failure, turning primary-key collisions into `AlreadyExists`.
pub(crate) fn map_insert_error(entity: &'static str, err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::AlreadyExists(entity);
        }
    }
    RepositoryError::Database(err)
}

pub(crate) fn to_column(field: &'static str, value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value).map_err(|_| RepositoryError::OutOfRange(field))
}

pub(crate) fn from_column<N>(field: &'static str, value: i64) -> Result<N, RepositoryError>
where
    N: TryFrom<i64>,
{
    N::try_from(value).map_err(|_| RepositoryError::OutOfRange(field))
}
