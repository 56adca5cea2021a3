//! SeaORM repository implementations

pub mod driver_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod slot_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}
