use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::booking_dto::{AvailabilityResponse, BookedDates, CheckAvailabilityRequest};
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::middleware::auth::AdminUser;
use crate::models::review::Review;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleUpdate};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/check-availability", post(check_availability))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/booked-dates", get(booked_dates))
        .route("/:id/reviews", get(vehicle_reviews))
}

async fn list_vehicles(
    State(state): State<AppState>,
    QueryParams(filters): QueryParams<VehicleFilters>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.list(&filters).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(NewVehicle::try_from(request)?).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, VehicleUpdate::try_from(request)?).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted".to_string())))
}

async fn check_availability(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CheckAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.check_availability(&request).await?;
    Ok(Json(response))
}

async fn booked_dates(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Vec<BookedDates>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.booked_dates(id).await?;
    Ok(Json(response))
}

async fn vehicle_reviews(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Vec<Review>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.reviews(id).await?;
    Ok(Json(response))
}
