use std::sync::Arc;

use crate::database::Store;
use crate::models::vehicle::{NewVehicle, Vehicle, VehicleFilters, VehicleUpdate};
use crate::utils::errors::{not_found_error, AppError};

pub struct VehicleRepository {
    store: Arc<Store>,
}

impl VehicleRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub async fn create(&self, new: NewVehicle) -> Result<Vehicle, AppError> {
        let mut tables = self.store.write().await;
        let id = tables.vehicle_ids.next_id();
        let vehicle = Vehicle::from_new(id, new);
        tables.vehicles.insert(id, vehicle.clone());
        log::debug!("vehicle {} inserted", id);
        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Vehicle>, AppError> {
        let tables = self.store.read().await;
        Ok(tables.vehicles.get(&id).cloned())
    }

    pub async fn list(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .vehicles
            .values()
            .filter(|v| filters.matches(v))
            .cloned()
            .collect())
    }

    pub async fn update(&self, id: u64, changes: VehicleUpdate) -> Result<Vehicle, AppError> {
        let mut tables = self.store.write().await;
        let vehicle = tables
            .vehicles
            .get_mut(&id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        changes.apply(vehicle);
        Ok(vehicle.clone())
    }

    /// Borrado permisivo: las reservas del vehículo se conservan.
    pub async fn delete(&self, id: u64) -> Result<Vehicle, AppError> {
        let mut tables = self.store.write().await;
        let removed = tables
            .vehicles
            .remove(&id)
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        let orphaned = tables
            .reservations
            .values()
            .filter(|r| r.vehicle_id == id)
            .count();
        if orphaned > 0 {
            log::warn!("vehicle {} deleted with {} reservation(s) still referencing it", id, orphaned);
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<(usize, usize), AppError> {
        let tables = self.store.read().await;
        let total = tables.vehicles.len();
        let available = tables.vehicles.values().filter(|v| v.available).count();
        Ok((total, available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::Transmission;
    use rust_decimal::Decimal;

    fn new_vehicle(name: &str, rate: i64) -> NewVehicle {
        NewVehicle {
            name: name.to_string(),
            brand: "Seat".to_string(),
            model: "Ibiza".to_string(),
            year: 2023,
            category: "economy".to_string(),
            daily_rate: Decimal::new(rate, 0),
            seats: 5,
            transmission: Transmission::Manual,
            image: None,
            description: None,
            features: vec![],
            available: true,
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let repo = VehicleRepository::new(Arc::new(Store::new()));

        let created = repo.create(new_vehicle("Seat Ibiza", 30)).await.unwrap();
        assert_eq!(created.id, 1);

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.name, "Seat Ibiza");

        let updated = repo
            .update(
                1,
                VehicleUpdate {
                    daily_rate: Some(Decimal::new(35, 0)),
                    available: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.daily_rate, Decimal::new(35, 0));
        assert!(!updated.available);
        assert_eq!(updated.name, "Seat Ibiza");

        assert_eq!(repo.count().await.unwrap(), (1, 0));

        repo.delete(1).await.unwrap();
        assert!(repo.find_by_id(1).await.unwrap().is_none());
        assert!(matches!(repo.delete(1).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = VehicleRepository::new(Arc::new(Store::new()));
        let result = repo.update(99, VehicleUpdate::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let repo = VehicleRepository::new(Arc::new(Store::new()));
        repo.create(new_vehicle("Cheap", 25)).await.unwrap();
        repo.create(new_vehicle("Pricey", 90)).await.unwrap();

        let filters = VehicleFilters {
            max_rate: Some(Decimal::new(50, 0)),
            ..Default::default()
        };
        let list = repo.list(&filters).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].name, "Cheap");
    }
}
