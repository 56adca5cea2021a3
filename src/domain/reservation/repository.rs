//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

/// Persistence contract for reservations.
///
/// All mutating operations on a slot's active-reservation set are invoked
/// only while the caller holds that slot's critical section; the store
/// itself needs no cross-call locking.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, reservation_id: &str) -> DomainResult<Option<Reservation>>;

    /// All reservations with `status = active` for one slot
    async fn find_active_for_slot(&self, slot_id: &str) -> DomainResult<Vec<Reservation>>;

    /// All reservations, any status
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// All reservations for a driver, any status
    async fn find_for_driver(&self, driver_id: &str) -> DomainResult<Vec<Reservation>>;

    /// Set the status of an existing reservation
    async fn update_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> DomainResult<()>;

    /// Replace the time window of an existing reservation
    async fn update_range(
        &self,
        reservation_id: &str,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
    ) -> DomainResult<()>;

    /// Administrative hard delete
    async fn delete(&self, reservation_id: &str) -> DomainResult<()>;
}
