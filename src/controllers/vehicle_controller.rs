use tracing::info;

use crate::dto::booking_dto::{AvailabilityResponse, BookedDates, CheckAvailabilityRequest};
use crate::dto::common_dto::ApiResponse;
use crate::models::review::Review;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleUpdate};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability_service::AvailabilityChecker;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleController {
    repository: VehicleRepository,
    bookings: BookingRepository,
    reviews: ReviewRepository,
    checker: AvailabilityChecker,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: VehicleRepository::new(state.store.clone()),
            bookings: BookingRepository::new(state.store.clone()),
            reviews: ReviewRepository::new(state.store.clone()),
            checker: state.availability(),
        }
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list(filters).await
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn create(&self, new: NewVehicle) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self.repository.create(new).await?;
        info!("🚗 Vehículo {} creado: {}", vehicle.id, vehicle.name);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle created".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: u64,
        changes: VehicleUpdate,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self.repository.update(id, changes).await?;
        info!("✏️ Vehículo {} actualizado", id);

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehicle updated".to_string(),
        ))
    }

    /// Borrado permisivo: las reservas existentes se conservan
    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let vehicle = self.repository.delete(id).await?;
        info!("🗑️ Vehículo {} eliminado: {}", id, vehicle.name);
        Ok(())
    }

    pub async fn check_availability(
        &self,
        request: &CheckAvailabilityRequest,
    ) -> Result<AvailabilityResponse, AppError> {
        let range = request.dates()?;
        let available = self
            .bookings
            .is_available(request.car_id, &range, &self.checker)
            .await?;

        tracing::debug!(
            "availability vehicle {} {}..{} -> {}",
            request.car_id,
            range.pickup_date,
            range.return_date,
            available
        );
        Ok(AvailabilityResponse { available })
    }

    /// Intervalos que bloquean el vehículo (para el calendario)
    pub async fn booked_dates(&self, id: u64) -> Result<Vec<BookedDates>, AppError> {
        self.get_by_id(id).await?;
        let reservations = self.bookings.find_by_vehicle(id).await?;

        Ok(reservations
            .iter()
            .filter(|r| self.checker.blocks(r))
            .map(BookedDates::from)
            .collect())
    }

    pub async fn reviews(&self, id: u64) -> Result<Vec<Review>, AppError> {
        self.get_by_id(id).await?;
        self.reviews.find_by_vehicle(id).await
    }
}
