//! Modelo de Reservation
//!
//! Una reserva ocupa un vehículo entre `pickup_date` y `return_date`.
//! Invariante: `return_date > pickup_date`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::extra::Extra;

/// Estado de la reserva
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Active,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::Active,
        ReservationStatus::Completed,
        ReservationStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Active => "active",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::Completed | ReservationStatus::Cancelled)
    }

    /// Transiciones permitidas:
    /// pending → confirmed | cancelled, confirmed → active | cancelled,
    /// active → completed.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, Active)
                | (Confirmed, Cancelled)
                | (Active, Completed)
        )
    }

    /// Reservas que cuentan como ingresos en el dashboard
    pub fn counts_as_revenue(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Confirmed | ReservationStatus::Active | ReservationStatus::Completed
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReservationStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown reservation status '{}'", s))
    }
}

/// Reserva de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: u64,
    pub user_id: u64,
    pub vehicle_id: u64,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub extras: Vec<String>,
    pub total_price: Decimal,
    pub status: ReservationStatus,
    pub payment_reference: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar una reserva nueva. El precio lo fija el repositorio
/// con la tarifa vigente del vehículo.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub user_id: u64,
    pub vehicle_id: u64,
    pub pickup_location: String,
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
    pub extras: Vec<Extra>,
}

/// Cambios de admin sobre una reserva existente
#[derive(Debug, Clone, Default)]
pub struct ReservationChanges {
    pub status: Option<ReservationStatus>,
    pub pickup_location: Option<String>,
}

impl ReservationChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.pickup_location.is_none()
    }
}

impl Reservation {
    pub fn from_new(id: u64, new: NewReservation, total_price: Decimal) -> Self {
        Self {
            id,
            user_id: new.user_id,
            vehicle_id: new.vehicle_id,
            pickup_location: new.pickup_location,
            pickup_date: new.pickup_date,
            return_date: new.return_date,
            extras: new.extras.iter().map(|e| e.code.to_string()).collect(),
            total_price,
            status: ReservationStatus::Pending,
            payment_reference: None,
            paid_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.user_id == user_id
    }
}
