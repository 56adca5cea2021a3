//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};

use crate::application::{LifecycleManager, SlotAllocator};
use crate::domain::{RepositoryProvider, ReservationStatus};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub allocator: Arc<SlotAllocator>,
    pub lifecycle: Arc<LifecycleManager>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn parse_timestamp<T>(
    field: &str,
    value: &str,
) -> Result<DateTime<Utc>, (StatusCode, Json<ApiResponse<T>>)> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Invalid {}: {}", field, e))),
            )
        })
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation committed", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid range or malformed request"),
        (status = 404, description = "Unknown slot or driver"),
        (status = 409, description = "Overlapping active reservation on the slot")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> HandlerResult<ReservationDto> {
    let entry_time = parse_timestamp("entry_time", &request.entry_time)?;
    let exit_time = parse_timestamp("exit_time", &request.exit_time)?;

    let reservation = state
        .allocator
        .reserve(&request.driver_id, &request.slot_id, entry_time, exit_time)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ReservationListParams),
    responses(
        (status = 200, description = "Reservations matching the filters", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(params): Query<ReservationListParams>,
) -> HandlerResult<Vec<ReservationDto>> {
    let reservations = match params.driver_id.as_deref() {
        Some(driver_id) => state
            .repos
            .reservations()
            .find_for_driver(driver_id)
            .await
            .map_err(domain_error_response)?,
        None => state
            .repos
            .reservations()
            .find_all()
            .await
            .map_err(domain_error_response)?,
    };

    let status_filter = params.status.as_deref().and_then(ReservationStatus::parse);

    let dtos: Vec<ReservationDto> = reservations
        .into_iter()
        .filter(|r| {
            params
                .slot_id
                .as_deref()
                .is_none_or(|slot_id| r.slot_id == slot_id)
        })
        .filter(|r| status_filter.is_none_or(|status| r.status == status))
        .map(ReservationDto::from)
        .collect();

    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
) -> HandlerResult<ReservationDto> {
    let reservation = state
        .repos
        .reservations()
        .find_by_id(&reservation_id)
        .await
        .map_err(domain_error_response)?;

    let Some(r) = reservation else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Reservation {} not found",
                reservation_id
            ))),
        ));
    };

    Ok(Json(ApiResponse::success(r.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{reservation_id}/status",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Reservation transitioned", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Reservation already terminal")
    )
)]
pub async fn update_reservation_status(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> HandlerResult<ReservationDto> {
    let Some(status) = ReservationStatus::parse(&request.status) else {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!(
                "Unknown status '{}', expected completed or cancelled",
                request.status
            ))),
        ));
    };

    let reservation = state
        .lifecycle
        .transition(&reservation_id, status)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{reservation_id}/times",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    request_body = UpdateTimesRequest,
    responses(
        (status = 200, description = "Times changed", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid range"),
        (status = 404, description = "Not found"),
        (status = 409, description = "New range overlaps another active reservation")
    )
)]
pub async fn update_reservation_times(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
    Json(request): Json<UpdateTimesRequest>,
) -> HandlerResult<ReservationDto> {
    let entry_time = parse_timestamp("entry_time", &request.entry_time)?;
    let exit_time = parse_timestamp("exit_time", &request.exit_time)?;

    let reservation = state
        .lifecycle
        .edit(&reservation_id, entry_time, exit_time)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<String>,
) -> HandlerResult<String> {
    state
        .lifecycle
        .delete(&reservation_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        "Reservation deleted successfully".to_string(),
    )))
}
