use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::vehicle::{NewVehicle, Transmission, VehicleUpdate};
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation::{validate_not_empty, validate_positive_amount, validate_transmission};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub name: String,
    #[validate(custom = "validate_not_empty", length(max = 60))]
    pub brand: String,
    #[validate(custom = "validate_not_empty", length(max = 60))]
    pub model: String,
    #[validate(range(min = 1950, max = 2100))]
    pub year: i32,
    #[validate(custom = "validate_not_empty")]
    pub category: String,
    #[validate(custom = "validate_positive_amount")]
    pub daily_rate: Decimal,
    #[validate(range(min = 1, max = 60))]
    pub seats: u8,
    #[validate(custom = "validate_transmission")]
    pub transmission: String,
    pub image: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

// Request para actualizar un vehículo
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_not_empty", length(max = 120))]
    pub name: Option<String>,
    #[validate(custom = "validate_not_empty", length(max = 60))]
    pub brand: Option<String>,
    #[validate(custom = "validate_not_empty", length(max = 60))]
    pub model: Option<String>,
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    #[validate(custom = "validate_not_empty")]
    pub category: Option<String>,
    #[validate(custom = "validate_positive_amount")]
    pub daily_rate: Option<Decimal>,
    #[validate(range(min = 1, max = 60))]
    pub seats: Option<u8>,
    #[validate(custom = "validate_transmission")]
    pub transmission: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub available: Option<bool>,
}

fn parse_transmission(value: &str) -> Result<Transmission, AppError> {
    value
        .parse()
        .map_err(|_| validation_error("transmission", "must be one of: automatic, manual"))
}

impl TryFrom<CreateVehicleRequest> for NewVehicle {
    type Error = AppError;

    fn try_from(request: CreateVehicleRequest) -> Result<Self, Self::Error> {
        Ok(NewVehicle {
            transmission: parse_transmission(&request.transmission)?,
            name: request.name.trim().to_string(),
            brand: request.brand.trim().to_string(),
            model: request.model.trim().to_string(),
            year: request.year,
            category: request.category.trim().to_lowercase(),
            daily_rate: request.daily_rate,
            seats: request.seats,
            image: request.image,
            description: request.description,
            features: request.features,
            available: request.available,
        })
    }
}

impl TryFrom<UpdateVehicleRequest> for VehicleUpdate {
    type Error = AppError;

    fn try_from(request: UpdateVehicleRequest) -> Result<Self, Self::Error> {
        let transmission = match request.transmission.as_deref() {
            Some(value) => Some(parse_transmission(value)?),
            None => None,
        };

        Ok(VehicleUpdate {
            name: request.name.map(|v| v.trim().to_string()),
            brand: request.brand.map(|v| v.trim().to_string()),
            model: request.model.map(|v| v.trim().to_string()),
            year: request.year,
            category: request.category.map(|v| v.trim().to_lowercase()),
            daily_rate: request.daily_rate,
            seats: request.seats,
            transmission,
            image: request.image,
            description: request.description,
            features: request.features,
            available: request.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_validation() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "name": "Seat Ibiza",
            "brand": "Seat",
            "model": "Ibiza",
            "year": 2022,
            "category": "Compact",
            "dailyRate": "39.90",
            "seats": 5,
            "transmission": "manual"
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let vehicle = NewVehicle::try_from(request).unwrap();
        assert_eq!(vehicle.category, "compact");
        assert_eq!(vehicle.transmission, Transmission::Manual);
        assert!(vehicle.available);
    }

    #[test]
    fn test_create_request_reports_each_field() {
        let request: CreateVehicleRequest = serde_json::from_value(json!({
            "name": " ",
            "brand": "Seat",
            "model": "Ibiza",
            "year": 1800,
            "category": "compact",
            "dailyRate": 0,
            "seats": 5,
            "transmission": "cvt"
        }))
        .unwrap();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "year", "daily_rate", "transmission"] {
            assert!(fields.contains_key(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_update_request_is_partial() {
        let request: UpdateVehicleRequest =
            serde_json::from_value(json!({ "dailyRate": 50, "available": false })).unwrap();
        assert!(request.validate().is_ok());
        let update = VehicleUpdate::try_from(request).unwrap();
        assert_eq!(update.daily_rate, Some(Decimal::new(50, 0)));
        assert!(update.name.is_none());
    }
}
