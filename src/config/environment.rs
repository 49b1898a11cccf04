//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las claves tienen un valor por defecto apto para desarrollo.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;

use crate::services::availability_service::{AvailabilityPolicy, BoundaryPolicy};

/// Duración máxima de una sesión: un año
pub const MAX_JWT_EXPIRATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub tax_rate_percent: Decimal,
    pub boundary_policy: BoundaryPolicy,
    pub ignore_cancelled: bool,
    pub bcrypt_cost: u32,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_email: String,
    pub seed_demo_fleet: bool,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration: 60 * 60 * 24,
            cors_origins: vec!["*".to_string()],
            tax_rate_percent: Decimal::from(18),
            boundary_policy: BoundaryPolicy::Inclusive,
            ignore_cancelled: true,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            admin_email: "admin@rental.local".to_string(),
            seed_demo_fleet: true,
            log_level: tracing::Level::INFO,
        }
    }
}

impl EnvironmentConfig {
    /// Cargar configuración desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let parse = |key: &str| -> Option<String> {
            lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        let cors_origins = match parse("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.cors_origins,
        };

        let bcrypt_cost: u32 = parse_or("BCRYPT_COST", parse("BCRYPT_COST"), defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(anyhow!("BCRYPT_COST must be between 4 and 31"));
        }

        let jwt_expiration: u64 =
            parse_or("JWT_EXPIRATION", parse("JWT_EXPIRATION"), defaults.jwt_expiration)?;
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&jwt_expiration) {
            return Err(anyhow!(
                "JWT_EXPIRATION must be between 1 and {} seconds",
                MAX_JWT_EXPIRATION_SECS
            ));
        }

        let tax_rate_percent: Decimal =
            parse_or("TAX_RATE_PERCENT", parse("TAX_RATE_PERCENT"), defaults.tax_rate_percent)?;
        if tax_rate_percent.is_sign_negative() {
            return Err(anyhow!("TAX_RATE_PERCENT must not be negative"));
        }

        Ok(Self {
            environment: parse("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", parse("PORT"), defaults.port)?,
            host: parse("HOST").unwrap_or(defaults.host),
            jwt_secret: parse("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_expiration,
            cors_origins,
            tax_rate_percent,
            boundary_policy: parse_or(
                "BOOKING_BOUNDARY_POLICY",
                parse("BOOKING_BOUNDARY_POLICY"),
                defaults.boundary_policy,
            )?,
            ignore_cancelled: parse_or(
                "AVAILABILITY_IGNORE_CANCELLED",
                parse("AVAILABILITY_IGNORE_CANCELLED"),
                defaults.ignore_cancelled,
            )?,
            bcrypt_cost,
            admin_username: parse("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
            admin_password: parse("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            admin_email: parse("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            seed_demo_fleet: parse_or("SEED_DEMO_FLEET", parse("SEED_DEMO_FLEET"), defaults.seed_demo_fleet)?,
            log_level: parse_or("LOG_LEVEL", parse("LOG_LEVEL"), defaults.log_level)?,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección de escucha del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Tasa de impuesto como fracción (18 → 0.18)
    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate_percent / Decimal::ONE_HUNDRED
    }

    pub fn availability_policy(&self) -> AvailabilityPolicy {
        AvailabilityPolicy {
            boundary: self.boundary_policy,
            ignore_cancelled: self.ignore_cancelled,
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value '{}'", key, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = EnvironmentConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.tax_rate(), Decimal::new(18, 2));
        assert_eq!(config.boundary_policy, BoundaryPolicy::Inclusive);
        assert!(config.ignore_cancelled);
        assert!(config.is_development());
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("TAX_RATE_PERCENT", "21"),
            ("BOOKING_BOUNDARY_POLICY", "half_open"),
            ("AVAILABILITY_IGNORE_CANCELLED", "false"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.tax_rate(), Decimal::new(21, 2));
        assert_eq!(config.boundary_policy, BoundaryPolicy::HalfOpen);
        assert!(!config.ignore_cancelled);
        assert_eq!(config.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(EnvironmentConfig::from_lookup(lookup(&[("PORT", "abc")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("BOOKING_BOUNDARY_POLICY", "sideways")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("BCRYPT_COST", "2")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup(&[("TAX_RATE_PERCENT", "-5")])).is_err());
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        assert!(EnvironmentConfig::from_lookup(lookup(&[("JWT_EXPIRATION", "0")])).is_err());
        assert!(
            EnvironmentConfig::from_lookup(lookup(&[("JWT_EXPIRATION", "100000000000000000")]))
                .is_err()
        );

        let config =
            EnvironmentConfig::from_lookup(lookup(&[("JWT_EXPIRATION", "31536000")])).unwrap();
        assert_eq!(config.jwt_expiration, MAX_JWT_EXPIRATION_SECS);
    }
}
