//! # Smart Parking Service
//!
//! Reservation service for a parking facility. Drivers reserve a slot
//! for a half-open time window `[entry, exit)`; the service guarantees
//! that no two active reservations for the same slot ever overlap,
//! even under concurrent requests.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Slot allocation, reservation lifecycle, background tasks
//! - **infrastructure**: Persistence (SeaORM database, in-memory store)
//! - **notifications**: Real-time WebSocket notifications for observers
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiState};

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
