use std::sync::Arc;

use chrono::Utc;

use crate::database::Store;
use crate::models::reservation::{
    NewReservation, Reservation, ReservationChanges, ReservationStatus,
};
use crate::services::availability_service::{AvailabilityChecker, DateRange};
use crate::services::pricing_service::PricingCalculator;
use crate::utils::errors::{not_found_error, AppError};

pub struct BookingRepository {
    store: Arc<Store>,
}

impl BookingRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Comprueba disponibilidad, calcula el precio con la tarifa vigente e
    /// inserta, todo bajo el mismo guard de escritura.
    pub async fn create_if_available(
        &self,
        new: NewReservation,
        checker: &AvailabilityChecker,
        pricing: &PricingCalculator,
    ) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;

        let vehicle = tables
            .vehicles
            .get(&new.vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", new.vehicle_id))?;
        if !vehicle.available {
            return Err(AppError::Conflict(format!(
                "Vehicle {} is not available for booking",
                vehicle.id
            )));
        }

        let candidate = DateRange::new(new.pickup_date, new.return_date);
        if let Some(conflict) =
            checker.find_conflict(tables.reservations.values(), new.vehicle_id, &candidate)
        {
            return Err(AppError::Conflict(format!(
                "Vehicle {} is already booked from {} to {} (reservation {})",
                new.vehicle_id, conflict.pickup_date, conflict.return_date, conflict.id
            )));
        }

        let price = pricing.quote_for_dates(
            vehicle.daily_rate,
            new.pickup_date,
            new.return_date,
            &new.extras,
        );

        let id = tables.reservation_ids.next_id();
        let reservation = Reservation::from_new(id, new, price.total);
        tables.reservations.insert(id, reservation.clone());
        log::debug!("reservation {} inserted for vehicle {}", id, reservation.vehicle_id);
        Ok(reservation)
    }

    /// `Ok(false)` si el vehículo está marcado como no disponible o si el
    /// intervalo choca con una reserva.
    pub async fn is_available(
        &self,
        vehicle_id: u64,
        candidate: &DateRange,
        checker: &AvailabilityChecker,
    ) -> Result<bool, AppError> {
        let tables = self.store.read().await;
        let vehicle = tables
            .vehicles
            .get(&vehicle_id)
            .ok_or_else(|| not_found_error("Vehicle", vehicle_id))?;
        if !vehicle.available {
            return Ok(false);
        }
        Ok(checker.is_available(tables.reservations.values(), vehicle_id, candidate))
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Reservation>, AppError> {
        let tables = self.store.read().await;
        Ok(tables.reservations.get(&id).cloned())
    }

    pub async fn list(&self, status: Option<ReservationStatus>) -> Result<Vec<Reservation>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    pub async fn find_by_user(&self, user_id: u64) -> Result<Vec<Reservation>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    pub async fn find_by_vehicle(&self, vehicle_id: u64) -> Result<Vec<Reservation>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .reservations
            .values()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }

    pub async fn update_status(
        &self,
        id: u64,
        next: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;
        let reservation = tables
            .reservations
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if !reservation.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Reservation {} cannot go from {} to {}",
                id, reservation.status, next
            )));
        }

        reservation.status = next;
        Ok(reservation.clone())
    }

    /// Aplica los cambios de admin de forma atómica: si alguno no es válido
    /// la reserva queda intacta.
    pub async fn update(
        &self,
        id: u64,
        changes: ReservationChanges,
    ) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;
        let reservation = tables
            .reservations
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if changes.pickup_location.is_some() && reservation.status.is_terminal() {
            return Err(AppError::Conflict(format!(
                "Reservation {} is {} and can no longer be changed",
                id, reservation.status
            )));
        }
        if let Some(next) = changes.status {
            if !reservation.status.can_transition_to(next) {
                return Err(AppError::Conflict(format!(
                    "Reservation {} cannot go from {} to {}",
                    id, reservation.status, next
                )));
            }
        }

        if let Some(location) = changes.pickup_location {
            reservation.pickup_location = location;
        }
        if let Some(next) = changes.status {
            reservation.status = next;
        }
        Ok(reservation.clone())
    }

    /// Pago simulado: pending → confirmed
    pub async fn mark_paid(&self, id: u64, payment_reference: String) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;
        let reservation = tables
            .reservations
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Reservation", id))?;

        if reservation.status != ReservationStatus::Pending {
            return Err(AppError::Conflict(format!(
                "Reservation {} is {} and cannot be paid",
                id, reservation.status
            )));
        }

        reservation.status = ReservationStatus::Confirmed;
        reservation.payment_reference = Some(payment_reference);
        reservation.paid_at = Some(Utc::now());
        Ok(reservation.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<Reservation, AppError> {
        let mut tables = self.store.write().await;
        tables
            .reservations
            .remove(&id)
            .ok_or_else(|| not_found_error("Reservation", id))
    }
}
