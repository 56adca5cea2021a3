//! Database entities module

pub mod driver;
pub mod reservation;
pub mod slot;

pub use driver::Entity as Driver;
pub use reservation::Entity as Reservation;
pub use slot::Entity as Slot;
