use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review de un vehículo (rating 1..=5)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    pub user_id: u64,
    pub vehicle_id: u64,
    pub booking_id: Option<u64>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: u64,
    pub vehicle_id: u64,
    pub booking_id: Option<u64>,
    pub rating: u8,
    pub comment: Option<String>,
}

impl Review {
    pub fn from_new(id: u64, new: NewReview) -> Self {
        Self {
            id,
            user_id: new.user_id,
            vehicle_id: new.vehicle_id,
            booking_id: new.booking_id,
            rating: new.rating,
            comment: new.comment,
            created_at: Utc::now(),
        }
    }
}
