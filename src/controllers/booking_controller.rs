use tracing::{info, warn};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::dto::booking_dto::{
    BookingListQuery, CreateBookingRequest, PayBookingRequest, QuoteRequest, QuoteResponse,
    UpdateBookingRequest,
};
use crate::dto::common_dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::extra::{self, Extra};
use crate::models::reservation::{
    NewReservation, Reservation, ReservationChanges, ReservationStatus,
};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::AvailabilityChecker;
use crate::services::pricing_service::PricingCalculator;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, forbidden_error, not_found_error, AppError};

/// Resolver los códigos de extras contra el catálogo
fn resolve_extras(codes: &[String]) -> Result<Vec<Extra>, AppError> {
    extra::resolve(codes).map_err(|unknown| {
        let mut error = ValidationError::new("unknown_extra");
        error.add_param("value".into(), &unknown);
        error.message = Some(format!("unknown extra '{}'", unknown).into());

        let mut errors = ValidationErrors::new();
        errors.add("extras", error);
        AppError::Validation(errors)
    })
}

pub struct BookingController {
    repository: BookingRepository,
    vehicles: VehicleRepository,
    pricing: PricingCalculator,
    checker: AvailabilityChecker,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: BookingRepository::new(state.store.clone()),
            vehicles: VehicleRepository::new(state.store.clone()),
            pricing: state.pricing(),
            checker: state.availability(),
        }
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, AppError> {
        let range = request.dates()?;
        let extras = resolve_extras(&request.extras)?;
        let vehicle = self
            .vehicles
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", request.car_id))?;

        let price = self.pricing.quote_for_dates(
            vehicle.daily_rate,
            range.pickup_date,
            range.return_date,
            &extras,
        );

        Ok(QuoteResponse {
            car_id: vehicle.id,
            pickup_date: range.pickup_date,
            return_date: range.return_date,
            price,
        })
    }

    /// Crea una reserva `pending` para el usuario de la sesión. El precio lo
    /// calcula el servidor, nunca se acepta del cliente.
    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateBookingRequest,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        let range = request.dates()?;
        let extras = resolve_extras(&request.extras)?;

        let reservation = self
            .repository
            .create_if_available(
                NewReservation {
                    user_id: user.user_id,
                    vehicle_id: request.car_id,
                    pickup_location: request.pickup_location.trim().to_string(),
                    pickup_date: range.pickup_date,
                    return_date: range.return_date,
                    extras,
                },
                &self.checker,
                &self.pricing,
            )
            .await
            .map_err(|e| {
                if let AppError::Conflict(msg) = &e {
                    warn!("⚠️ Reserva rechazada para {}: {}", user.username, msg);
                }
                e
            })?;

        info!(
            "📅 Reserva {} creada: vehículo {} del {} al {} por {} ({})",
            reservation.id,
            reservation.vehicle_id,
            reservation.pickup_date,
            reservation.return_date,
            user.username,
            reservation.total_price
        );

        Ok(ApiResponse::success_with_message(
            reservation,
            "Booking created".to_string(),
        ))
    }

    pub async fn list(&self, query: &BookingListQuery) -> Result<Vec<Reservation>, AppError> {
        self.repository.list(query.status).await
    }

    pub async fn list_for_user(&self, user: &AuthenticatedUser) -> Result<Vec<Reservation>, AppError> {
        self.repository.find_by_user(user.user_id).await
    }

    /// Solo el dueño o un admin
    pub async fn get_by_id(
        &self,
        user: &AuthenticatedUser,
        id: u64,
    ) -> Result<Reservation, AppError> {
        let reservation = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if !user.can_access(reservation.user_id) {
            return Err(forbidden_error("view booking", "it belongs to another user"));
        }
        Ok(reservation)
    }

    pub async fn update(
        &self,
        id: u64,
        request: UpdateBookingRequest,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        let changes = ReservationChanges {
            status: request.status,
            pickup_location: request.pickup_location.map(|l| l.trim().to_string()),
        };
        if changes.is_empty() {
            return Err(bad_request_error("Nothing to update"));
        }

        let reservation = self.repository.update(id, changes).await?;
        if let Some(status) = request.status {
            info!("🔄 Reserva {} pasa a {}", id, status);
        }

        Ok(ApiResponse::success_with_message(
            reservation,
            "Booking updated".to_string(),
        ))
    }

    /// Pago simulado: solo el dueño puede pagar su reserva
    pub async fn pay(
        &self,
        user: &AuthenticatedUser,
        id: u64,
        request: &PayBookingRequest,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        let reservation = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if !reservation.is_owned_by(user.user_id) {
            return Err(forbidden_error("pay booking", "it belongs to another user"));
        }

        let reference = format!(
            "PAY-{}",
            Uuid::new_v4().simple().to_string()[..12].to_uppercase()
        );
        let reservation = self.repository.mark_paid(id, reference).await?;

        info!(
            "💳 Reserva {} pagada ({}) por {}: {}",
            id, request.payment_method, user.username, reservation.total_price
        );

        Ok(ApiResponse::success_with_message(
            reservation,
            "Payment accepted".to_string(),
        ))
    }

    pub async fn cancel(
        &self,
        user: &AuthenticatedUser,
        id: u64,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        self.get_by_id(user, id).await?;
        let reservation = self
            .repository
            .update_status(id, ReservationStatus::Cancelled)
            .await?;

        info!("❌ Reserva {} cancelada por {}", id, user.username);
        Ok(ApiResponse::success_with_message(
            reservation,
            "Booking cancelled".to_string(),
        ))
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let reservation = self.repository.delete(id).await?;
        info!(
            "🗑️ Reserva {} eliminada (vehículo {}, estado {})",
            id, reservation.vehicle_id, reservation.status
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_extra_is_a_field_error() {
        match resolve_extras(&["gps".to_string(), "rocket".to_string()]) {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("extras"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(resolve_extras(&[]).unwrap().len(), 0);
    }
}
