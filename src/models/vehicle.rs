//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle tal como vive en el store en memoria
//! y los datos necesarios para crearlo.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tipo de transmisión
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmission::Automatic => "automatic",
            Transmission::Manual => "manual",
        }
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Transmission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "automatic" => Ok(Transmission::Automatic),
            "manual" => Ok(Transmission::Manual),
            other => Err(format!("unknown transmission '{}'", other)),
        }
    }
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub daily_rate: Decimal,
    pub seats: u8,
    pub transmission: Transmission,
    pub image: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub available: bool,
    /// Media de reviews, siempre en [0, 5]
    pub rating: f64,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
}

/// Datos para insertar un vehículo nuevo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub daily_rate: Decimal,
    pub seats: u8,
    pub transmission: Transmission,
    pub image: Option<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub available: bool,
}

impl Vehicle {
    pub fn from_new(id: u64, new: NewVehicle) -> Self {
        Self {
            id,
            name: new.name,
            brand: new.brand,
            model: new.model,
            year: new.year,
            category: new.category,
            daily_rate: new.daily_rate,
            seats: new.seats,
            transmission: new.transmission,
            image: new.image,
            description: new.description,
            features: new.features,
            available: new.available,
            rating: 0.0,
            review_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Cambios parciales sobre un vehículo; `None` deja el campo como está
#[derive(Debug, Clone, Default)]
pub struct VehicleUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub category: Option<String>,
    pub daily_rate: Option<Decimal>,
    pub seats: Option<u8>,
    pub transmission: Option<Transmission>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub available: Option<bool>,
}

impl VehicleUpdate {
    pub fn apply(self, vehicle: &mut Vehicle) {
        if let Some(name) = self.name {
            vehicle.name = name;
        }
        if let Some(brand) = self.brand {
            vehicle.brand = brand;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(year) = self.year {
            vehicle.year = year;
        }
        if let Some(category) = self.category {
            vehicle.category = category;
        }
        if let Some(daily_rate) = self.daily_rate {
            vehicle.daily_rate = daily_rate;
        }
        if let Some(seats) = self.seats {
            vehicle.seats = seats;
        }
        if let Some(transmission) = self.transmission {
            vehicle.transmission = transmission;
        }
        if self.image.is_some() {
            vehicle.image = self.image;
        }
        if self.description.is_some() {
            vehicle.description = self.description;
        }
        if let Some(features) = self.features {
            vehicle.features = features;
        }
        if let Some(available) = self.available {
            vehicle.available = available;
        }
    }
}

/// Filtros para el listado de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilters {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub transmission: Option<Transmission>,
    pub min_seats: Option<u8>,
    pub max_rate: Option<Decimal>,
    pub available: Option<bool>,
}

impl VehicleFilters {
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        if let Some(category) = &self.category {
            if !vehicle.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !vehicle.brand.eq_ignore_ascii_case(brand) {
                return false;
            }
        }
        if let Some(transmission) = self.transmission {
            if vehicle.transmission != transmission {
                return false;
            }
        }
        if let Some(min_seats) = self.min_seats {
            if vehicle.seats < min_seats {
                return false;
            }
        }
        if let Some(max_rate) = self.max_rate {
            if vehicle.daily_rate > max_rate {
                return false;
            }
        }
        if let Some(available) = self.available {
            if vehicle.available != available {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vehicle {
        Vehicle::from_new(
            1,
            NewVehicle {
                name: "Toyota Corolla".to_string(),
                brand: "Toyota".to_string(),
                model: "Corolla".to_string(),
                year: 2022,
                category: "compact".to_string(),
                daily_rate: Decimal::new(45, 0),
                seats: 5,
                transmission: Transmission::Automatic,
                image: None,
                description: None,
                features: vec!["Bluetooth".to_string()],
                available: true,
            },
        )
    }

    #[test]
    fn test_new_vehicle_starts_unrated() {
        let v = sample();
        assert_eq!(v.rating, 0.0);
        assert_eq!(v.review_count, 0);
    }

    #[test]
    fn test_transmission_parse() {
        assert_eq!("Manual".parse::<Transmission>().unwrap(), Transmission::Manual);
        assert!("cvt".parse::<Transmission>().is_err());
    }

    #[test]
    fn test_filters() {
        let v = sample();
        assert!(VehicleFilters::default().matches(&v));

        let f = VehicleFilters {
            brand: Some("toyota".to_string()),
            min_seats: Some(4),
            max_rate: Some(Decimal::new(50, 0)),
            ..Default::default()
        };
        assert!(f.matches(&v));

        let f = VehicleFilters {
            transmission: Some(Transmission::Manual),
            ..Default::default()
        };
        assert!(!f.matches(&v));

        let f = VehicleFilters {
            max_rate: Some(Decimal::new(40, 0)),
            ..Default::default()
        };
        assert!(!f.matches(&v));
    }
}
