//! Core business entities, value types and repository traits.

pub mod driver;
pub mod repositories;
pub mod reservation;
pub mod slot;

pub use crate::shared::errors::DomainError;
pub use driver::{Driver, DriverRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{Reservation, ReservationRepository, ReservationStatus, TimeRange};
pub use slot::{derive_availability, Slot, SlotRepository};
