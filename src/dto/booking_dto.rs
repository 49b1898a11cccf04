use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::reservation::{Reservation, ReservationStatus};
use crate::services::availability_service::DateRange;
use crate::services::pricing_service::PriceBreakdown;
use crate::utils::errors::AppError;
use crate::utils::validation::{parse_date, validate_date_range, validate_iso_date, validate_not_empty};

/// Fechas de un request ya convertidas y comprobadas (devolución > recogida)
fn date_range(pickup_date: &str, return_date: &str) -> Result<DateRange, AppError> {
    let pickup = parse_date("pickupDate", pickup_date)?;
    let return_date = parse_date("returnDate", return_date)?;
    validate_date_range(pickup, return_date)?;
    Ok(DateRange::new(pickup, return_date))
}

// Request para comprobar disponibilidad
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    pub car_id: u64,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_iso_date")]
    pub return_date: String,
}

impl CheckAvailabilityRequest {
    pub fn dates(&self) -> Result<DateRange, AppError> {
        date_range(&self.pickup_date, &self.return_date)
    }
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

// Request de presupuesto
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub car_id: u64,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_iso_date")]
    pub return_date: String,
    #[serde(default)]
    pub extras: Vec<String>,
}

impl QuoteRequest {
    pub fn dates(&self) -> Result<DateRange, AppError> {
        date_range(&self.pickup_date, &self.return_date)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub car_id: u64,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    #[serde(flatten)]
    pub price: PriceBreakdown,
}

// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub car_id: u64,
    #[validate(custom = "validate_not_empty", length(max = 200))]
    pub pickup_location: String,
    #[validate(custom = "validate_iso_date")]
    pub pickup_date: String,
    #[validate(custom = "validate_iso_date")]
    pub return_date: String,
    #[serde(default)]
    pub extras: Vec<String>,
}

impl CreateBookingRequest {
    pub fn dates(&self) -> Result<DateRange, AppError> {
        date_range(&self.pickup_date, &self.return_date)
    }
}

// Request de actualización (admin)
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: Option<ReservationStatus>,
    #[validate(custom = "validate_not_empty", length(max = 200))]
    pub pickup_location: Option<String>,
}

// Pago simulado
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PayBookingRequest {
    #[validate(custom = "validate_payment_method")]
    pub payment_method: String,
    #[validate(length(equal = 4))]
    pub card_last4: Option<String>,
}

fn validate_payment_method(value: &str) -> Result<(), validator::ValidationError> {
    crate::utils::validation::validate_enum(value, &["card", "paypal", "cash"])
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub status: Option<ReservationStatus>,
}

/// Intervalo ocupado de un vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedDates {
    pub booking_id: u64,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub status: ReservationStatus,
}

impl From<&Reservation> for BookedDates {
    fn from(reservation: &Reservation) -> Self {
        Self {
            booking_id: reservation.id,
            pickup_date: reservation.pickup_date,
            return_date: reservation.return_date,
            status: reservation.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_availability_dates() {
        let request: CheckAvailabilityRequest = serde_json::from_value(json!({
            "carId": 1,
            "pickupDate": "2025-01-10",
            "returnDate": "2025-01-12"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        let range = request.dates().unwrap();
        assert_eq!(range.pickup_date.to_string(), "2025-01-10");
    }

    #[test]
    fn test_inverted_dates_are_rejected() {
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "carId": 1,
            "pickupLocation": "Airport",
            "pickupDate": "2025-01-12",
            "returnDate": "2025-01-12"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert!(matches!(request.dates(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_bad_date_format_fails_validation() {
        let request: QuoteRequest = serde_json::from_value(json!({
            "carId": 1,
            "pickupDate": "12/01/2025",
            "returnDate": "2025-01-14"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("pickup_date"));
    }

    #[test]
    fn test_payment_request() {
        let ok: PayBookingRequest =
            serde_json::from_value(json!({ "paymentMethod": "card", "cardLast4": "4242" })).unwrap();
        assert!(ok.validate().is_ok());

        let bad: PayBookingRequest =
            serde_json::from_value(json!({ "paymentMethod": "bitcoin", "cardLast4": "42" })).unwrap();
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_status_parses_lowercase() {
        let request: UpdateBookingRequest =
            serde_json::from_value(json!({ "status": "confirmed" })).unwrap();
        assert_eq!(request.status, Some(ReservationStatus::Confirmed));
    }
}
