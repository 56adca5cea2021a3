//! Slot DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Slot;

/// Slot details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotDto {
    pub slot_id: String,
    pub location: String,
    pub floor: String,
    pub section: String,
    /// Derived availability cache; advisory, refreshed on every commit
    /// and by the periodic refresh task
    pub is_available: bool,
    pub created_at: String,
}

impl From<Slot> for SlotDto {
    fn from(s: Slot) -> Self {
        Self {
            slot_id: s.slot_id,
            location: s.location,
            floor: s.floor,
            section: s.section,
            is_available: s.is_available,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Filters for listing the catalog
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SlotListParams {
    /// Only slots on this floor
    pub floor: Option<String>,
    /// Only slots in this section
    pub section: Option<String>,
    /// Only slots whose cached availability matches
    pub available: Option<bool>,
}

/// Query for point-in-time availability
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvailabilityParams {
    /// Instant to evaluate (ISO 8601); defaults to now
    pub at: Option<String>,
}

/// Point-in-time availability, derived from the active-reservation set
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub slot_id: String,
    pub at: String,
    pub is_available: bool,
}
