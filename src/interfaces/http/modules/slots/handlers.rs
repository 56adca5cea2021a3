//! Slot catalog HTTP handlers
//!
//! Read-only: catalog population is external seeding, and availability
//! writes belong to the allocator and lifecycle manager. These reads are
//! advisory display data and take no slot lock.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};

use crate::domain::{derive_availability, RepositoryProvider};
use crate::interfaces::http::common::{domain_error_response, ApiResponse};

use super::dto::*;

/// Application state for slot handlers.
#[derive(Clone)]
pub struct SlotAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    get,
    path = "/api/v1/slots",
    tag = "Slots",
    params(SlotListParams),
    responses(
        (status = 200, description = "Slot catalog", body = ApiResponse<Vec<SlotDto>>)
    )
)]
pub async fn list_slots(
    State(state): State<SlotAppState>,
    Query(params): Query<SlotListParams>,
) -> HandlerResult<Vec<SlotDto>> {
    let slots = state
        .repos
        .slots()
        .find_all()
        .await
        .map_err(domain_error_response)?;

    let dtos: Vec<SlotDto> = slots
        .into_iter()
        .filter(|s| params.floor.as_deref().is_none_or(|f| s.floor == f))
        .filter(|s| params.section.as_deref().is_none_or(|sec| s.section == sec))
        .filter(|s| params.available.is_none_or(|a| s.is_available == a))
        .map(SlotDto::from)
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/slots/{slot_id}",
    tag = "Slots",
    params(("slot_id" = String, Path, description = "Slot ID")),
    responses(
        (status = 200, description = "Slot details", body = ApiResponse<SlotDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_slot(
    State(state): State<SlotAppState>,
    Path(slot_id): Path<String>,
) -> HandlerResult<SlotDto> {
    let slot = state
        .repos
        .slots()
        .find_by_id(&slot_id)
        .await
        .map_err(domain_error_response)?;

    let Some(slot) = slot else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Slot {} not found", slot_id))),
        ));
    };

    Ok(Json(ApiResponse::success(slot.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/slots/{slot_id}/availability",
    tag = "Slots",
    params(
        ("slot_id" = String, Path, description = "Slot ID"),
        AvailabilityParams
    ),
    responses(
        (status = 200, description = "Availability derived from the active set", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Malformed timestamp"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_slot_availability(
    State(state): State<SlotAppState>,
    Path(slot_id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> HandlerResult<AvailabilityDto> {
    let at: DateTime<Utc> = match params.at.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Invalid at: {}", e))),
                )
            })?,
        None => Utc::now(),
    };

    if state
        .repos
        .slots()
        .find_by_id(&slot_id)
        .await
        .map_err(domain_error_response)?
        .is_none()
    {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Slot {} not found", slot_id))),
        ));
    }

    // Derived from the authoritative set, not the cached flag, so this
    // answers correctly for future-dated instants too.
    let active = state
        .repos
        .reservations()
        .find_active_for_slot(&slot_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(AvailabilityDto {
        slot_id,
        at: at.to_rfc3339(),
        is_available: derive_availability(&active, at),
    })))
}
