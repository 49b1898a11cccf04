//! Servicio de disponibilidad
//!
//! Decide si un intervalo de fechas candidato choca con alguna reserva
//! existente del mismo vehículo. La política de bordes y el tratamiento de
//! las reservas canceladas vienen de la configuración.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::reservation::{Reservation, ReservationStatus};

/// Cómo se comparan los extremos de dos intervalos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// `[a,b]` y `[c,d]` chocan si `a <= d && c <= b`: devolver un coche el
    /// mismo día que empieza otra reserva cuenta como conflicto.
    #[default]
    Inclusive,
    /// `[a,b)` y `[c,d)` chocan si `a < d && c < b`: reservas consecutivas
    /// están permitidas.
    HalfOpen,
}

impl fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPolicy::Inclusive => f.write_str("inclusive"),
            BoundaryPolicy::HalfOpen => f.write_str("half_open"),
        }
    }
}

impl FromStr for BoundaryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inclusive" => Ok(BoundaryPolicy::Inclusive),
            "half_open" | "half-open" | "exclusive" => Ok(BoundaryPolicy::HalfOpen),
            other => Err(format!(
                "unknown boundary policy '{}' (expected 'inclusive' or 'half_open')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityPolicy {
    pub boundary: BoundaryPolicy,
    pub ignore_cancelled: bool,
}

impl Default for AvailabilityPolicy {
    fn default() -> Self {
        Self {
            boundary: BoundaryPolicy::Inclusive,
            ignore_cancelled: true,
        }
    }
}

/// Intervalo de fechas de una reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub pickup_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl DateRange {
    pub fn new(pickup_date: NaiveDate, return_date: NaiveDate) -> Self {
        Self {
            pickup_date,
            return_date,
        }
    }

    pub fn of(reservation: &Reservation) -> Self {
        Self::new(reservation.pickup_date, reservation.return_date)
    }

    pub fn overlaps(&self, other: &DateRange, boundary: BoundaryPolicy) -> bool {
        match boundary {
            BoundaryPolicy::Inclusive => {
                self.pickup_date <= other.return_date && other.pickup_date <= self.return_date
            }
            BoundaryPolicy::HalfOpen => {
                self.pickup_date < other.return_date && other.pickup_date < self.return_date
            }
        }
    }
}

/// Comprobador de disponibilidad
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityChecker {
    policy: AvailabilityPolicy,
}

impl AvailabilityChecker {
    pub fn new(policy: AvailabilityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AvailabilityPolicy {
        self.policy
    }

    /// ¿Cuenta esta reserva para el cálculo de solapes?
    pub fn blocks(&self, reservation: &Reservation) -> bool {
        !(self.policy.ignore_cancelled && reservation.status == ReservationStatus::Cancelled)
    }

    /// Primera reserva del vehículo que choca con el candidato
    pub fn find_conflict<'a, I>(
        &self,
        reservations: I,
        vehicle_id: u64,
        candidate: &DateRange,
    ) -> Option<&'a Reservation>
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        reservations.into_iter().find(|r| {
            r.vehicle_id == vehicle_id
                && self.blocks(r)
                && DateRange::of(r).overlaps(candidate, self.policy.boundary)
        })
    }

    pub fn is_available<'a, I>(&self, reservations: I, vehicle_id: u64, candidate: &DateRange) -> bool
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        self.find_conflict(reservations, vehicle_id, candidate).is_none()
    }
}
