//! Datos iniciales
//!
//! Crea el administrador configurado y, si se pide, una flota de demostración
//! cuando el store está vacío.

use rust_decimal::Decimal;

use crate::models::vehicle::{NewVehicle, Transmission};
use crate::repositories::{
    user_repository::UserRepository, vehicle_repository::VehicleRepository,
};
use crate::services::auth_service::{AuthService, Registration};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Resumen de lo sembrado al arrancar
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub admin_created: bool,
    pub vehicles_created: usize,
}

pub async fn seed(state: &AppState) -> Result<SeedReport, AppError> {
    let mut report = SeedReport::default();

    let users = UserRepository::new(state.store.clone());
    if users
        .find_by_username(&state.config.admin_username)
        .await?
        .is_none()
    {
        AuthService::new(state)
            .register(Registration {
                username: state.config.admin_username.clone(),
                password: state.config.admin_password.clone(),
                email: state.config.admin_email.clone(),
                first_name: "Admin".to_string(),
                last_name: String::new(),
                is_admin: true,
            })
            .await?;
        report.admin_created = true;
        tracing::info!("👤 Administrador '{}' creado", state.config.admin_username);
    }

    if state.config.seed_demo_fleet {
        let vehicles = VehicleRepository::new(state.store.clone());
        let (total, _) = vehicles.count().await?;
        if total == 0 {
            for vehicle in demo_fleet() {
                vehicles.create(vehicle).await?;
                report.vehicles_created += 1;
            }
            tracing::info!("🚗 Flota de demo creada: {} vehículos", report.vehicles_created);
        }
    }

    Ok(report)
}

#[allow(clippy::too_many_arguments)]
fn demo_vehicle(
    name: &str,
    brand: &str,
    model: &str,
    category: &str,
    daily_rate: Decimal,
    seats: u8,
    transmission: Transmission,
    features: &[&str],
) -> NewVehicle {
    NewVehicle {
        name: name.to_string(),
        brand: brand.to_string(),
        model: model.to_string(),
        year: 2023,
        category: category.to_string(),
        daily_rate,
        seats,
        transmission,
        image: None,
        description: None,
        features: features.iter().map(|f| f.to_string()).collect(),
        available: true,
    }
}

fn demo_fleet() -> Vec<NewVehicle> {
    vec![
        demo_vehicle(
            "Toyota Corolla",
            "Toyota",
            "Corolla",
            "sedan",
            Decimal::new(4500, 2),
            5,
            Transmission::Automatic,
            &["Bluetooth", "Air conditioning"],
        ),
        demo_vehicle(
            "Volkswagen Polo",
            "Volkswagen",
            "Polo",
            "compact",
            Decimal::new(3500, 2),
            5,
            Transmission::Manual,
            &["Air conditioning"],
        ),
        demo_vehicle(
            "Ford Explorer",
            "Ford",
            "Explorer",
            "suv",
            Decimal::new(8500, 2),
            7,
            Transmission::Automatic,
            &["4x4", "Bluetooth", "Cruise control"],
        ),
        demo_vehicle(
            "BMW 3 Series",
            "BMW",
            "320i",
            "luxury",
            Decimal::new(12000, 2),
            5,
            Transmission::Automatic,
            &["Leather seats", "Navigation", "Bluetooth"],
        ),
        demo_vehicle(
            "Renault Trafic",
            "Renault",
            "Trafic",
            "van",
            Decimal::new(9500, 2),
            9,
            Transmission::Manual,
            &["Large trunk"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;
    use crate::database::Store;
    use std::sync::Arc;

    fn state(seed_demo_fleet: bool) -> AppState {
        let config = EnvironmentConfig {
            bcrypt_cost: 4,
            seed_demo_fleet,
            ..Default::default()
        };
        AppState::new(config, Arc::new(Store::new()))
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let state = state(true);

        let first = seed(&state).await.unwrap();
        assert!(first.admin_created);
        assert_eq!(first.vehicles_created, demo_fleet().len());

        let second = seed(&state).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let admin = UserRepository::new(state.store.clone())
            .find_by_username("admin")
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin);
    }

    #[tokio::test]
    async fn test_seed_without_fleet() {
        let state = state(false);
        let report = seed(&state).await.unwrap();
        assert!(report.admin_created);
        assert_eq!(report.vehicles_created, 0);
        let (total, _) = VehicleRepository::new(state.store.clone()).count().await.unwrap();
        assert_eq!(total, 0);
    }
}
