//! Slot aggregate

pub mod model;
pub mod repository;

pub use model::{derive_availability, Slot};
pub use repository::SlotRepository;
