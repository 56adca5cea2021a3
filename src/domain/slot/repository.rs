//! Slot catalog repository interface

use async_trait::async_trait;

use super::model::Slot;
use crate::domain::DomainResult;

#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Add a slot to the catalog (seeding; fails if the ID exists)
    async fn save(&self, slot: Slot) -> DomainResult<()>;

    /// Find slot by ID
    async fn find_by_id(&self, slot_id: &str) -> DomainResult<Option<Slot>>;

    /// Whole catalog
    async fn find_all(&self) -> DomainResult<Vec<Slot>>;

    /// Write the derived availability cache for a slot
    async fn update_availability(&self, slot_id: &str, is_available: bool) -> DomainResult<()>;

    /// Number of slots in the catalog
    async fn count(&self) -> DomainResult<u64>;
}
