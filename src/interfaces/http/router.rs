//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{LifecycleManager, SlotAllocator};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::notifications::{ws_notifications_handler, NotificationState, SharedEventBus};

use super::modules::drivers::{self, DriverAppState};
use super::modules::health::{self, HealthState};
use super::modules::reservations::{self, ReservationAppState};
use super::modules::slots::{self, SlotAppState};

/// Unified state for all routes.
/// Axum extracts the specific handler state via `FromRef`.
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub allocator: Arc<SlotAllocator>,
    pub lifecycle: Arc<LifecycleManager>,
    pub event_bus: SharedEventBus,
    pub db: DatabaseConnection,
    pub started_at: Arc<Instant>,
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<ApiState> for SlotAppState {
    fn from_ref(s: &ApiState) -> Self {
        SlotAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for DriverAppState {
    fn from_ref(s: &ApiState) -> Self {
        DriverAppState {
            repos: Arc::clone(&s.repos),
        }
    }
}

impl FromRef<ApiState> for ReservationAppState {
    fn from_ref(s: &ApiState) -> Self {
        ReservationAppState {
            repos: Arc::clone(&s.repos),
            allocator: Arc::clone(&s.allocator),
            lifecycle: Arc::clone(&s.lifecycle),
        }
    }
}

impl FromRef<ApiState> for HealthState {
    fn from_ref(s: &ApiState) -> Self {
        HealthState {
            db: s.db.clone(),
            event_bus: s.event_bus.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<ApiState> for NotificationState {
    fn from_ref(s: &ApiState) -> Self {
        NotificationState {
            event_bus: s.event_bus.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Slots
        slots::handlers::list_slots,
        slots::handlers::get_slot,
        slots::handlers::get_slot_availability,
        // Drivers
        drivers::handlers::create_driver,
        drivers::handlers::list_drivers,
        drivers::handlers::get_driver,
        drivers::handlers::update_driver,
        drivers::handlers::delete_driver,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::update_reservation_status,
        reservations::handlers::update_reservation_times,
        reservations::handlers::delete_reservation,
    ),
    components(schemas(
        ApiResponse<slots::dto::SlotDto>,
        health::handlers::HealthResponse,
        health::handlers::ComponentHealth,
        slots::dto::SlotDto,
        slots::dto::AvailabilityDto,
        drivers::dto::DriverDto,
        drivers::dto::CreateDriverRequest,
        drivers::dto::UpdateDriverRequest,
        reservations::dto::ReservationDto,
        reservations::dto::CreateReservationRequest,
        reservations::dto::UpdateStatusRequest,
        reservations::dto::UpdateTimesRequest,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Slots", description = "Parking slot catalog and availability"),
        (name = "Drivers", description = "Driver directory"),
        (name = "Reservations", description = "Slot reservations")
    ),
    info(
        title = "Smart Parking API",
        description = "Reservation service with exclusive per-slot time-window allocation"
    )
)]
struct ApiDoc;

/// Build the REST API router.
pub fn create_api_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::handlers::health_check))
        // Slots
        .route("/api/v1/slots", get(slots::handlers::list_slots))
        .route("/api/v1/slots/{slot_id}", get(slots::handlers::get_slot))
        .route(
            "/api/v1/slots/{slot_id}/availability",
            get(slots::handlers::get_slot_availability),
        )
        // Drivers
        .route("/api/v1/drivers", post(drivers::handlers::create_driver))
        .route("/api/v1/drivers", get(drivers::handlers::list_drivers))
        .route(
            "/api/v1/drivers/{driver_id}",
            get(drivers::handlers::get_driver),
        )
        .route(
            "/api/v1/drivers/{driver_id}",
            put(drivers::handlers::update_driver),
        )
        .route(
            "/api/v1/drivers/{driver_id}",
            delete(drivers::handlers::delete_driver),
        )
        // Reservations
        .route(
            "/api/v1/reservations",
            post(reservations::handlers::create_reservation),
        )
        .route(
            "/api/v1/reservations",
            get(reservations::handlers::list_reservations),
        )
        .route(
            "/api/v1/reservations/{reservation_id}",
            get(reservations::handlers::get_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/status",
            put(reservations::handlers::update_reservation_status),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/times",
            put(reservations::handlers::update_reservation_times),
        )
        .route(
            "/api/v1/reservations/{reservation_id}",
            delete(reservations::handlers::delete_reservation),
        )
        // Real-time notifications
        .route(
            "/api/v1/notifications/ws",
            get(ws_notifications_handler),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
