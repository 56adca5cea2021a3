//! Driver directory entity
//!
//! Drivers are an external collaborator from the allocator's point of view:
//! the core only needs existence checks. Credential handling is out of
//! scope, so the record carries no password material.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Driver {
    /// Human-facing ID, e.g. `DRV001`. Immutable.
    pub driver_id: String,
    pub name: String,
    pub email: String,
    /// National identity card number
    pub nic: String,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn new(
        driver_id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        nic: impl Into<String>,
    ) -> Self {
        Self {
            driver_id: driver_id.into(),
            name: name.into(),
            email: email.into(),
            nic: nic.into(),
            created_at: Utc::now(),
        }
    }
}
