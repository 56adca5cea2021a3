//! Driver aggregate

pub mod model;
pub mod repository;

pub use model::Driver;
pub use repository::DriverRepository;
