//! In-memory repository provider for development and testing
//!
//! DashMap-backed, no durability. Behaves like the SeaORM provider from the
//! domain's point of view, including the error cases, so the application
//! layer can be exercised without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::driver::{Driver, DriverRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus};
use crate::domain::slot::{Slot, SlotRepository};
use crate::domain::{DomainError, DomainResult};

#[derive(Default)]
pub struct MemoryRepositoryProvider {
    slots: MemorySlotRepository,
    drivers: MemoryDriverRepository,
    reservations: MemoryReservationRepository,
}

impl MemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for MemoryRepositoryProvider {
    fn slots(&self) -> &dyn SlotRepository {
        &self.slots
    }

    fn drivers(&self) -> &dyn DriverRepository {
        &self.drivers
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

// ── Slots ───────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySlotRepository {
    slots: DashMap<String, Slot>,
}

#[async_trait]
impl SlotRepository for MemorySlotRepository {
    async fn save(&self, slot: Slot) -> DomainResult<()> {
        if self.slots.contains_key(&slot.slot_id) {
            return Err(DomainError::Conflict(format!("Slot {}", slot.slot_id)));
        }
        self.slots.insert(slot.slot_id.clone(), slot);
        Ok(())
    }

    async fn find_by_id(&self, slot_id: &str) -> DomainResult<Option<Slot>> {
        Ok(self.slots.get(slot_id).map(|s| s.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Slot>> {
        let mut all: Vec<Slot> = self.slots.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.slot_id.cmp(&b.slot_id));
        Ok(all)
    }

    async fn update_availability(&self, slot_id: &str, is_available: bool) -> DomainResult<()> {
        if let Some(mut slot) = self.slots.get_mut(slot_id) {
            slot.is_available = is_available;
            Ok(())
        } else {
            Err(DomainError::not_found("Slot", "slot_id", slot_id))
        }
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.slots.len() as u64)
    }
}

// ── Drivers ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryDriverRepository {
    drivers: DashMap<String, Driver>,
}

#[async_trait]
impl DriverRepository for MemoryDriverRepository {
    async fn save(&self, driver: Driver) -> DomainResult<()> {
        if self.drivers.contains_key(&driver.driver_id) {
            return Err(DomainError::Conflict(format!("Driver {}", driver.driver_id)));
        }
        self.drivers.insert(driver.driver_id.clone(), driver);
        Ok(())
    }

    async fn find_by_id(&self, driver_id: &str) -> DomainResult<Option<Driver>> {
        Ok(self.drivers.get(driver_id).map(|d| d.clone()))
    }

    async fn exists(&self, driver_id: &str) -> DomainResult<bool> {
        Ok(self.drivers.contains_key(driver_id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Driver>> {
        let mut all: Vec<Driver> = self.drivers.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.driver_id.cmp(&b.driver_id));
        Ok(all)
    }

    async fn update(&self, driver: Driver) -> DomainResult<()> {
        if !self.drivers.contains_key(&driver.driver_id) {
            return Err(DomainError::not_found(
                "Driver",
                "driver_id",
                driver.driver_id,
            ));
        }
        self.drivers.insert(driver.driver_id.clone(), driver);
        Ok(())
    }

    async fn delete(&self, driver_id: &str) -> DomainResult<()> {
        self.drivers
            .remove(driver_id)
            .ok_or_else(|| DomainError::not_found("Driver", "driver_id", driver_id))?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.drivers.len() as u64)
    }
}

// ── Reservations ────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryReservationRepository {
    reservations: DashMap<String, Reservation>,
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        self.reservations
            .insert(reservation.reservation_id.clone(), reservation);
        Ok(())
    }

    async fn find_by_id(&self, reservation_id: &str) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(reservation_id).map(|r| r.clone()))
    }

    async fn find_active_for_slot(&self, slot_id: &str) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.slot_id == slot_id && r.is_active())
            .map(|r| r.clone())
            .collect())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.iter().map(|r| r.clone()).collect())
    }

    async fn find_for_driver(&self, driver_id: &str) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.driver_id == driver_id)
            .map(|r| r.clone())
            .collect())
    }

    async fn update_status(
        &self,
        reservation_id: &str,
        status: ReservationStatus,
    ) -> DomainResult<()> {
        if let Some(mut r) = self.reservations.get_mut(reservation_id) {
            r.status = status;
            Ok(())
        } else {
            Err(DomainError::not_found(
                "Reservation",
                "reservation_id",
                reservation_id,
            ))
        }
    }

    async fn update_range(
        &self,
        reservation_id: &str,
        entry_time: DateTime<Utc>,
        exit_time: DateTime<Utc>,
    ) -> DomainResult<()> {
        if let Some(mut r) = self.reservations.get_mut(reservation_id) {
            r.entry_time = entry_time;
            r.exit_time = exit_time;
            Ok(())
        } else {
            Err(DomainError::not_found(
                "Reservation",
                "reservation_id",
                reservation_id,
            ))
        }
    }

    async fn delete(&self, reservation_id: &str) -> DomainResult<()> {
        self.reservations.remove(reservation_id).ok_or_else(|| {
            DomainError::not_found("Reservation", "reservation_id", reservation_id)
        })?;
        Ok(())
    }
}
