use tracing::info;

use crate::dto::review_dto::{CreateReviewRequest, ReviewResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::review::NewReview;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::state::AppState;
use crate::utils::errors::{forbidden_error, not_found_error, validation_error, AppError};

pub struct ReviewController {
    repository: ReviewRepository,
    bookings: BookingRepository,
}

impl ReviewController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: ReviewRepository::new(state.store.clone()),
            bookings: BookingRepository::new(state.store.clone()),
        }
    }

    /// Crea la review y devuelve el rating actualizado del vehículo.
    /// Si trae `bookingId`, la reserva debe ser del usuario y del mismo coche.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateReviewRequest,
    ) -> Result<ReviewResponse, AppError> {
        if let Some(booking_id) = request.booking_id {
            let booking = self
                .bookings
                .find_by_id(booking_id)
                .await?
                .ok_or_else(|| not_found_error("Reservation", booking_id))?;

            if !booking.is_owned_by(user.user_id) {
                return Err(forbidden_error("review booking", "it belongs to another user"));
            }
            if booking.vehicle_id != request.car_id {
                return Err(validation_error(
                    "bookingId",
                    "booking does not belong to this vehicle",
                ));
            }
        }

        let (review, rating_summary) = self
            .repository
            .create_and_aggregate(NewReview {
                user_id: user.user_id,
                vehicle_id: request.car_id,
                booking_id: request.booking_id,
                rating: request.rating,
                comment: request
                    .comment
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            })
            .await?;

        info!(
            "⭐ Review {} de {} para vehículo {}: {} → media {:.1} ({} reviews)",
            review.id,
            user.username,
            review.vehicle_id,
            review.rating,
            rating_summary.average,
            rating_summary.count
        );

        Ok(ReviewResponse {
            review,
            rating_summary,
        })
    }
}
