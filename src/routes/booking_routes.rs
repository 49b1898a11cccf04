use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::booking_controller::BookingController;
use crate::dto::booking_dto::{
    BookingListQuery, CreateBookingRequest, PayBookingRequest, QuoteRequest, QuoteResponse,
    UpdateBookingRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::{AdminUser, AuthenticatedUser};
use crate::models::extra::{self, Extra};
use crate::models::reservation::Reservation;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/quote", post(quote_booking))
        .route("/me", get(my_bookings))
        .route(
            "/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/:id/pay", post(pay_booking))
        .route("/:id/cancel", post(cancel_booking))
}

pub async fn list_extras() -> Json<&'static [Extra]> {
    Json(extra::catalog())
}

async fn quote_booking(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.quote(&request).await?;
    Ok(Json(response))
}

async fn create_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reservation>>), AppError> {
    let controller = BookingController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_bookings(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<BookingListQuery>,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list(&query).await?;
    Ok(Json(response))
}

async fn my_bookings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_for_user(&user).await?;
    Ok(Json(response))
}

async fn get_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathId(id): PathId,
) -> Result<Json<Reservation>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.get_by_id(&user, id).await?;
    Ok(Json(response))
}

async fn update_booking(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn pay_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<PayBookingRequest>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.pay(&user, id, &request).await?;
    Ok(Json(response))
}

async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.cancel(&user, id).await?;
    Ok(Json(response))
}

async fn delete_booking(
    State(state): State<AppState>,
    _admin: AdminUser,
    PathId(id): PathId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BookingController::new(&state);
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Booking deleted".to_string())))
}
