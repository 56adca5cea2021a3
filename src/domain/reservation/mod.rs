//! Reservation aggregate
//!
//! Contains the Reservation entity, the TimeRange value type that owns the
//! half-open overlap semantics, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationStatus, TimeRange};
pub use repository::ReservationRepository;
