//! Driver DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Driver;

/// Request to register a driver
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 50))]
    pub driver_id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub nic: String,
}

/// Request to update a driver's descriptive fields
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 20))]
    pub nic: String,
}

/// Driver details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct DriverDto {
    pub driver_id: String,
    pub name: String,
    pub email: String,
    pub nic: String,
    pub created_at: String,
}

impl From<Driver> for DriverDto {
    fn from(d: Driver) -> Self {
        Self {
            driver_id: d.driver_id,
            name: d.name,
            email: d.email,
            nic: d.nic,
            created_at: d.created_at.to_rfc3339(),
        }
    }
}
