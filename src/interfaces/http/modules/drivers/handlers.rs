//! Driver directory HTTP handlers
//!
//! Plain data entry with no concurrency hazard; the core only depends on
//! the directory through the existence check.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::{Driver, RepositoryProvider};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for driver handlers.
#[derive(Clone)]
pub struct DriverAppState {
    pub repos: Arc<dyn RepositoryProvider>,
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

#[utoipa::path(
    post,
    path = "/api/v1/drivers",
    tag = "Drivers",
    request_body = CreateDriverRequest,
    responses(
        (status = 200, description = "Driver registered", body = ApiResponse<DriverDto>),
        (status = 409, description = "Driver ID already exists"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_driver(
    State(state): State<DriverAppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> HandlerResult<DriverDto> {
    let driver = Driver::new(request.driver_id, request.name, request.email, request.nic);

    state
        .repos
        .drivers()
        .save(driver.clone())
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(driver.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers",
    tag = "Drivers",
    responses(
        (status = 200, description = "All registered drivers", body = ApiResponse<Vec<DriverDto>>)
    )
)]
pub async fn list_drivers(State(state): State<DriverAppState>) -> HandlerResult<Vec<DriverDto>> {
    let drivers = state
        .repos
        .drivers()
        .find_all()
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        drivers.into_iter().map(DriverDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/drivers/{driver_id}",
    tag = "Drivers",
    params(("driver_id" = String, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver details", body = ApiResponse<DriverDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_driver(
    State(state): State<DriverAppState>,
    Path(driver_id): Path<String>,
) -> HandlerResult<DriverDto> {
    let driver = state
        .repos
        .drivers()
        .find_by_id(&driver_id)
        .await
        .map_err(domain_error_response)?;

    let Some(driver) = driver else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Driver {} not found",
                driver_id
            ))),
        ));
    };

    Ok(Json(ApiResponse::success(driver.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/drivers/{driver_id}",
    tag = "Drivers",
    params(("driver_id" = String, Path, description = "Driver ID")),
    request_body = UpdateDriverRequest,
    responses(
        (status = 200, description = "Driver updated", body = ApiResponse<DriverDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_driver(
    State(state): State<DriverAppState>,
    Path(driver_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDriverRequest>,
) -> HandlerResult<DriverDto> {
    let existing = state
        .repos
        .drivers()
        .find_by_id(&driver_id)
        .await
        .map_err(domain_error_response)?;

    let Some(mut driver) = existing else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Driver {} not found",
                driver_id
            ))),
        ));
    };

    driver.name = request.name;
    driver.email = request.email;
    driver.nic = request.nic;

    state
        .repos
        .drivers()
        .update(driver.clone())
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(driver.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/drivers/{driver_id}",
    tag = "Drivers",
    params(("driver_id" = String, Path, description = "Driver ID")),
    responses(
        (status = 200, description = "Driver removed", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_driver(
    State(state): State<DriverAppState>,
    Path(driver_id): Path<String>,
) -> HandlerResult<String> {
    state
        .repos
        .drivers()
        .delete(&driver_id)
        .await
        .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        "Driver deleted successfully".to_string(),
    )))
}
