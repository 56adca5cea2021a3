//! External concerns: database, in-memory storage.

pub mod database;
pub mod storage;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use storage::MemoryRepositoryProvider;
