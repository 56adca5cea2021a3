//! Slot allocator
//!
//! The single authority that decides whether a requested (slot, time-range)
//! is free and atomically commits the reservation if so. Guarantees that
//! no two active reservations on the same slot overlap in time.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::application::availability::recompute_slot_availability;
use crate::domain::{
    DomainError, DomainResult, Reservation, RepositoryProvider, TimeRange,
};
use crate::notifications::{
    Event, ReservationChange, ReservationUpdatedEvent, SharedEventBus, SlotUpdatedEvent,
};

/// Per-slot critical sections.
///
/// One async mutex per slot ID, created lazily on first use. Two requests
/// for the same slot serialize on its mutex; requests for different slots
/// never contend. The guard is held across the store round-trips so that
/// logical commits stay serialized even though the I/O interleaves.
pub struct SlotLockRegistry {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SlotLockRegistry {
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// The lock for one slot. Entries are never removed: the registry is
    /// bounded by the slot catalog, which is small and static.
    pub fn lock_for(&self, slot_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(slot_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

impl Default for SlotLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides and commits exclusive bookings.
pub struct SlotAllocator {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLockRegistry>,
    event_bus: SharedEventBus,
}

impl SlotAllocator {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        locks: Arc<SlotLockRegistry>,
        event_bus: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            locks,
            event_bus,
        }
    }

    /// Reserve `slot_id` for `driver_id` over `[entry_time, exit_time)`.
    ///
    /// Validation order: range, driver, slot. The overlap check and the
    /// write happen inside the slot's critical section; on conflict nothing
    /// is written. Events are published only after the commit.
    pub async fn reserve(
        &self,
        driver_id: &str,
        slot_id: &str,
        entry_time: chrono::DateTime<chrono::Utc>,
        exit_time: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<Reservation> {
        let range = TimeRange::new(entry_time, exit_time)?;

        if !self.repos.drivers().exists(driver_id).await? {
            return Err(DomainError::not_found("Driver", "driver_id", driver_id));
        }
        self.repos
            .slots()
            .find_by_id(slot_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Slot", "slot_id", slot_id))?;

        let lock = self.locks.lock_for(slot_id);
        let _guard = lock.lock().await;

        // Overlap is computed against the authoritative active set, never
        // against the cached is_available flag.
        let active = self.repos.reservations().find_active_for_slot(slot_id).await?;
        if active.iter().any(|r| r.range().overlaps(&range)) {
            debug!(slot_id, driver_id, "Reservation rejected: overlap");
            return Err(DomainError::SlotConflict {
                slot_id: slot_id.to_string(),
            });
        }

        let reservation = Reservation::new(driver_id, slot_id, range);
        self.repos.reservations().save(reservation.clone()).await?;

        let is_available = recompute_slot_availability(self.repos.as_ref(), slot_id).await?;

        drop(_guard);

        info!(
            reservation_id = %reservation.reservation_id,
            slot_id,
            driver_id,
            "Reservation committed"
        );

        self.event_bus.publish(Event::SlotUpdated(SlotUpdatedEvent {
            slot_id: slot_id.to_string(),
            is_available,
            timestamp: chrono::Utc::now(),
        }));
        self.event_bus
            .publish(Event::ReservationUpdated(ReservationUpdatedEvent {
                reservation_id: reservation.reservation_id.clone(),
                slot_id: slot_id.to_string(),
                driver_id: driver_id.to_string(),
                change: ReservationChange::Created,
                timestamp: chrono::Utc::now(),
            }));

        Ok(reservation)
    }
}
