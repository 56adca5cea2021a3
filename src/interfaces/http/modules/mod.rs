//! HTTP modules, one per API surface.

pub mod drivers;
pub mod health;
pub mod reservations;
pub mod slots;
