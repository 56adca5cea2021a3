//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Reservation;

/// Request to book a slot for a time window
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Driver making the reservation
    #[validate(length(min = 1, max = 50))]
    pub driver_id: String,
    /// Slot to reserve
    #[validate(length(min = 1, max = 50))]
    pub slot_id: String,
    /// Window start (ISO 8601)
    pub entry_time: String,
    /// Window end (ISO 8601), must be after entry_time
    pub exit_time: String,
}

/// Request to transition a reservation to a terminal status
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Target status: "completed" or "cancelled"
    pub status: String,
}

/// Request to change a reservation's time window
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTimesRequest {
    /// New window start (ISO 8601)
    pub entry_time: String,
    /// New window end (ISO 8601)
    pub exit_time: String,
}

/// Filters for listing reservations
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReservationListParams {
    /// Only reservations for this driver
    pub driver_id: Option<String>,
    /// Only reservations on this slot
    pub slot_id: Option<String>,
    /// Only reservations with this status
    pub status: Option<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub reservation_id: String,
    pub driver_id: String,
    pub slot_id: String,
    pub entry_time: String,
    pub exit_time: String,
    pub reserved_at: String,
    pub status: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            reservation_id: r.reservation_id,
            driver_id: r.driver_id,
            slot_id: r.slot_id,
            entry_time: r.entry_time.to_rfc3339(),
            exit_time: r.exit_time.to_rfc3339(),
            reserved_at: r.reserved_at.to_rfc3339(),
            status: r.status.as_str().to_string(),
        }
    }
}
