use std::sync::Arc;

use crate::database::{Store, Tables};
use crate::models::review::{NewReview, Review};
use crate::services::rating_service::{self, RatingSummary};
use crate::utils::errors::{not_found_error, AppError};

pub struct ReviewRepository {
    store: Arc<Store>,
}

impl ReviewRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Inserta la review y recalcula el rating del vehículo con el mismo guard.
    pub async fn create_and_aggregate(
        &self,
        new: NewReview,
    ) -> Result<(Review, RatingSummary), AppError> {
        let mut tables = self.store.write().await;

        if !tables.vehicles.contains_key(&new.vehicle_id) {
            return Err(not_found_error("Vehicle", new.vehicle_id));
        }

        if let Some(booking_id) = new.booking_id {
            if tables.reviews.values().any(|r| r.booking_id == Some(booking_id)) {
                return Err(AppError::Conflict(format!(
                    "Reservation {} has already been reviewed",
                    booking_id
                )));
            }
        }

        let id = tables.review_ids.next_id();
        let review = Review::from_new(id, new);
        tables.reviews.insert(id, review.clone());

        let summary = aggregate_into_vehicle(&mut tables, review.vehicle_id);
        log::debug!(
            "review {} stored, vehicle {} now {:.1} ({} reviews)",
            id,
            review.vehicle_id,
            summary.average,
            summary.count
        );
        Ok((review, summary))
    }

    pub async fn count(&self) -> Result<usize, AppError> {
        Ok(self.store.read().await.reviews.len())
    }

    /// Reviews de un vehículo, más recientes primero
    pub async fn find_by_vehicle(&self, vehicle_id: u64) -> Result<Vec<Review>, AppError> {
        let tables = self.store.read().await;
        Ok(tables
            .reviews
            .values()
            .rev()
            .filter(|r| r.vehicle_id == vehicle_id)
            .cloned()
            .collect())
    }
}

fn aggregate_into_vehicle(tables: &mut Tables, vehicle_id: u64) -> RatingSummary {
    let summary = rating_service::aggregate(
        tables
            .reviews
            .values()
            .filter(|r| r.vehicle_id == vehicle_id)
            .map(|r| r.rating),
    );

    if let Some(vehicle) = tables.vehicles.get_mut(&vehicle_id) {
        vehicle.rating = summary.average;
        vehicle.review_count = summary.count;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::{NewVehicle, Transmission};
    use crate::repositories::vehicle_repository::VehicleRepository;
    use rust_decimal::Decimal;

    async fn store_with_vehicle() -> Arc<Store> {
        let store = Arc::new(Store::new());
        VehicleRepository::new(store.clone())
            .create(NewVehicle {
                name: "Renault Clio".to_string(),
                brand: "Renault".to_string(),
                model: "Clio".to_string(),
                year: 2020,
                category: "economy".to_string(),
                daily_rate: Decimal::new(28, 0),
                seats: 5,
                transmission: Transmission::Manual,
                image: None,
                description: None,
                features: vec![],
                available: true,
            })
            .await
            .unwrap();
        store
    }

    fn review(user_id: u64, booking_id: Option<u64>, rating: u8) -> NewReview {
        NewReview {
            user_id,
            vehicle_id: 1,
            booking_id,
            rating,
            comment: None,
        }
    }

    #[tokio::test]
    async fn test_aggregates_into_vehicle() {
        let store = store_with_vehicle().await;
        let repo = ReviewRepository::new(store.clone());

        for (user, rating) in [(1, 5), (2, 3), (3, 4)] {
            repo.create_and_aggregate(review(user, None, rating)).await.unwrap();
        }

        let vehicle = VehicleRepository::new(store).find_by_id(1).await.unwrap().unwrap();
        assert_eq!(vehicle.rating, 4.0);
        assert_eq!(vehicle.review_count, 3);

        let stored = repo.find_by_vehicle(1).await.unwrap();
        let again = rating_service::aggregate(stored.iter().map(|r| r.rating));
        assert_eq!(again.average, vehicle.rating);
        assert_eq!(again.count, vehicle.review_count);
    }

    #[tokio::test]
    async fn test_one_review_per_booking() {
        let repo = ReviewRepository::new(store_with_vehicle().await);
        repo.create_and_aggregate(review(1, Some(7), 5)).await.unwrap();
        let dup = repo.create_and_aggregate(review(1, Some(7), 1)).await;
        assert!(matches!(dup, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_unknown_vehicle() {
        let repo = ReviewRepository::new(Arc::new(Store::new()));
        let result = repo.create_and_aggregate(review(1, None, 5)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_vehicle_newest_first() {
        let repo = ReviewRepository::new(store_with_vehicle().await);
        repo.create_and_aggregate(review(1, None, 2)).await.unwrap();
        repo.create_and_aggregate(review(2, None, 5)).await.unwrap();

        let reviews = repo.find_by_vehicle(1).await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, 5);
    }
}
