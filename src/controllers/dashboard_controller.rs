use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::dto::dashboard_dto::DashboardStats;
use crate::models::reservation::ReservationStatus;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::review_repository::ReviewRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct DashboardController {
    vehicles: VehicleRepository,
    bookings: BookingRepository,
    users: UserRepository,
    reviews: ReviewRepository,
}

impl DashboardController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: VehicleRepository::new(state.store.clone()),
            bookings: BookingRepository::new(state.store.clone()),
            users: UserRepository::new(state.store.clone()),
            reviews: ReviewRepository::new(state.store.clone()),
        }
    }

    /// Ingresos = reservas confirmed + active + completed
    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let (total_vehicles, available_vehicles) = self.vehicles.count().await?;
        let bookings = self.bookings.list(None).await?;

        let mut bookings_by_status: BTreeMap<String, usize> = ReservationStatus::ALL
            .iter()
            .map(|status| (status.to_string(), 0))
            .collect();
        let mut total_revenue = Decimal::ZERO;

        for booking in &bookings {
            *bookings_by_status
                .entry(booking.status.to_string())
                .or_default() += 1;
            if booking.status.counts_as_revenue() {
                total_revenue += booking.total_price;
            }
        }

        Ok(DashboardStats {
            total_vehicles,
            available_vehicles,
            total_users: self.users.count().await?,
            total_bookings: bookings.len(),
            bookings_by_status,
            total_revenue,
            total_reviews: self.reviews.count().await?,
        })
    }
}
