//! Driver directory repository interface

use async_trait::async_trait;

use super::model::Driver;
use crate::domain::DomainResult;

#[async_trait]
pub trait DriverRepository: Send + Sync {
    /// Register a driver (fails if the ID exists)
    async fn save(&self, driver: Driver) -> DomainResult<()>;

    /// Find driver by ID
    async fn find_by_id(&self, driver_id: &str) -> DomainResult<Option<Driver>>;

    /// The allocator's existence check
    async fn exists(&self, driver_id: &str) -> DomainResult<bool>;

    /// All registered drivers
    async fn find_all(&self) -> DomainResult<Vec<Driver>>;

    /// Update descriptive fields (name, email, nic)
    async fn update(&self, driver: Driver) -> DomainResult<()>;

    /// Remove a driver from the directory
    async fn delete(&self, driver_id: &str) -> DomainResult<()>;

    /// Number of registered drivers
    async fn count(&self) -> DomainResult<u64>;
}
