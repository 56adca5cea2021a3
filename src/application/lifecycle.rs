//! Reservation lifecycle manager
//!
//! Owns every mutation of an existing reservation: status transitions,
//! administrative time edits, and hard deletes. Re-derives the slot's
//! availability after each mutation and broadcasts the change.

use std::sync::Arc;

use tracing::info;

use crate::application::allocator::SlotLockRegistry;
use crate::application::availability::recompute_slot_availability;
use crate::domain::{
    DomainError, DomainResult, Reservation, ReservationStatus, RepositoryProvider, TimeRange,
};
use crate::notifications::{
    Event, ReservationChange, ReservationUpdatedEvent, SharedEventBus, SlotUpdatedEvent,
};

pub struct LifecycleManager {
    repos: Arc<dyn RepositoryProvider>,
    locks: Arc<SlotLockRegistry>,
    event_bus: SharedEventBus,
}

impl LifecycleManager {
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

    async fn find_required(&self, reservation_id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found("Reservation", "reservation_id", reservation_id)
            })
    }

    /// Transition an active reservation to `completed` or `cancelled`.
    ///
    /// Both targets are terminal. Freeing a slot cannot
    /// create a conflict, so no overlap re-check is needed.
    pub async fn transition(
        &self,
        reservation_id: &str,
        new_status: ReservationStatus,
    ) -> DomainResult<Reservation> {
        let reservation = self.find_required(reservation_id).await?;

        if new_status == ReservationStatus::Active {
            return Err(DomainError::InvalidTransition {
                reservation_id: reservation_id.to_string(),
                status: reservation.status.to_string(),
            });
        }

        let lock = self.locks.lock_for(&reservation.slot_id);
        let _guard = lock.lock().await;

        // Re-read under the lock: a racing transition may have terminated
        // this reservation while we waited, and a terminal status must
        // never be overwritten.
        let mut reservation = self.find_required(reservation_id).await?;
        if !reservation.is_active() {
            return Err(DomainError::InvalidTransition {
                reservation_id: reservation_id.to_string(),
                status: reservation.status.to_string(),
            });
        }

        self.repos
            .reservations()
            .update_status(reservation_id, new_status)
            .await?;
        reservation.status = new_status;

        let is_available =
            recompute_slot_availability(self.repos.as_ref(), &reservation.slot_id).await?;
        drop(_guard);

        info!(reservation_id, status = %new_status, "Reservation transitioned");

        let change = match new_status {
            ReservationStatus::Completed => ReservationChange::Completed,
            _ => ReservationChange::Cancelled,
        };
        self.broadcast(&reservation, is_available, change);

        Ok(reservation)
    }

    /// Replace the time window of an active reservation.
    ///
    /// Runs the same per-slot critical-section overlap check as the
    /// allocator, excluding the edited reservation from the active set.
    /// On conflict the original times stay untouched.
    pub async fn edit(
        &self,
        reservation_id: &str,
        new_entry: chrono::DateTime<chrono::Utc>,
        new_exit: chrono::DateTime<chrono::Utc>,
    ) -> DomainResult<Reservation> {
        let range = TimeRange::new(new_entry, new_exit)?;
        let reservation = self.find_required(reservation_id).await?;

        let lock = self.locks.lock_for(&reservation.slot_id);
        let _guard = lock.lock().await;

        // Status is only trustworthy under the lock; a transition that won
        // the race must make this edit fail, not be silently rewritten.
        let mut reservation = self.find_required(reservation_id).await?;
        if !reservation.is_active() {
            return Err(DomainError::InvalidTransition {
                reservation_id: reservation_id.to_string(),
                status: reservation.status.to_string(),
            });
        }

        let active = self
            .repos
            .reservations()
            .find_active_for_slot(&reservation.slot_id)
            .await?;
        if active
            .iter()
            .filter(|r| r.reservation_id != reservation_id)
            .any(|r| r.range().overlaps(&range))
        {
            return Err(DomainError::SlotConflict {
                slot_id: reservation.slot_id.clone(),
            });
        }

        self.repos
            .reservations()
            .update_range(reservation_id, new_entry, new_exit)
            .await?;
        reservation.entry_time = new_entry;
        reservation.exit_time = new_exit;

        let is_available =
            recompute_slot_availability(self.repos.as_ref(), &reservation.slot_id).await?;
        drop(_guard);

        info!(reservation_id, "Reservation times changed");
        self.broadcast(&reservation, is_available, ReservationChange::TimesChanged);

        Ok(reservation)
    }

    /// Administrative hard delete, permitted in any status.
    pub async fn delete(&self, reservation_id: &str) -> DomainResult<()> {
        let reservation = self.find_required(reservation_id).await?;

        let lock = self.locks.lock_for(&reservation.slot_id);
        let _guard = lock.lock().await;

        self.repos.reservations().delete(reservation_id).await?;

        let is_available =
            recompute_slot_availability(self.repos.as_ref(), &reservation.slot_id).await?;
        drop(_guard);

        info!(reservation_id, "Reservation deleted");
        self.broadcast(&reservation, is_available, ReservationChange::Deleted);

        Ok(())
    }

    fn broadcast(&self, reservation: &Reservation, is_available: bool, change: ReservationChange) {
        self.event_bus.publish(Event::SlotUpdated(SlotUpdatedEvent {
            slot_id: reservation.slot_id.clone(),
            is_available,
            timestamp: chrono::Utc::now(),
        }));
        self.event_bus
            .publish(Event::ReservationUpdated(ReservationUpdatedEvent {
                reservation_id: reservation.reservation_id.clone(),
                slot_id: reservation.slot_id.clone(),
                driver_id: reservation.driver_id.clone(),
                change,
                timestamp: chrono::Utc::now(),
            }));
    }
}
