//! Utilidades de validación
//!
//! Funciones helper usadas por los DTOs (`#[validate(custom = ...)]`) y por
//! los controllers, más el extractor `ValidatedJson`.

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::utils::errors::{validation_error, AppError};

lazy_static! {
    /// Usernames: letras, dígitos, `_`, `.` y `-`
    pub static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").unwrap();
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Variante para `#[validate(custom = ...)]`
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    validate_date(value).map(|_| ())
}

/// Convertir un campo de fecha ya validado
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, AppError> {
    validate_date(value).map_err(|_| validation_error(field, "expected a date in YYYY-MM-DD format"))
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("must be greater than zero".into());
        return Err(error);
    }
    Ok(())
}

/// Validar tipo de transmisión
pub fn validate_transmission(value: &str) -> Result<(), ValidationError> {
    validate_enum(value, &["automatic", "manual"])
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_enum(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value);
        error.add_param("allowed_values".into(), &allowed_values);
        error.message = Some(format!("must be one of: {}", allowed_values.join(", ")).into());
        return Err(error);
    }
    Ok(())
}

/// Validar que la fecha de devolución sea posterior a la de recogida
pub fn validate_date_range(pickup: NaiveDate, return_date: NaiveDate) -> Result<(), AppError> {
    if return_date <= pickup {
        return Err(validation_error(
            "returnDate",
            "return date must be after pickup date",
        ));
    }
    Ok(())
}

/// JSON extractor que además ejecuta `Validate` sobre el payload
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Id numérico en la ruta (`/:id`); un id mal formado da 400 con cuerpo JSON
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state).await?;
        Ok(PathId(id))
    }
}

/// Query string con rechazo en formato `AppError`
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-01-15").is_ok());
        assert!(validate_date("2024/01/15").is_err());
        assert!(validate_iso_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_date_reports_field() {
        assert!(parse_date("pickupDate", "2025-01-10").is_ok());
        match parse_date("pickupDate", "10/01/2025") {
            Err(AppError::Validation(errors)) => {
                assert!(errors.field_errors().contains_key("pickupDate"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Lisbon airport").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(&Decimal::new(4550, 2)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
        assert!(validate_positive_amount(&Decimal::new(-1, 0)).is_err());
    }

    #[test]
    fn test_validate_transmission() {
        assert!(validate_transmission("automatic").is_ok());
        assert!(validate_transmission("manual").is_ok());
        assert!(validate_transmission("cvt").is_err());
    }

    #[test]
    fn test_username_regex() {
        assert!(USERNAME_RE.is_match("maria.lopez"));
        assert!(USERNAME_RE.is_match("driver_42"));
        assert!(!USERNAME_RE.is_match("ab"));
        assert!(!USERNAME_RE.is_match("has space"));
    }

    #[test]
    fn test_validate_date_range() {
        let d = |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert!(validate_date_range(d("2025-01-10"), d("2025-01-12")).is_ok());
        assert!(validate_date_range(d("2025-01-10"), d("2025-01-10")).is_err());
        assert!(validate_date_range(d("2025-01-12"), d("2025-01-10")).is_err());
    }
}
