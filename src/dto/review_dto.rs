use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::review::Review;
use crate::services::rating_service::RatingSummary;

// Request para crear una review
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub car_id: u64,
    pub booking_id: Option<u64>,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

// Review creada + rating actualizado del vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review: Review,
    pub rating_summary: RatingSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rating_range() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let request: CreateReviewRequest =
                serde_json::from_value(json!({ "carId": 1, "rating": rating })).unwrap();
            assert_eq!(request.validate().is_ok(), ok, "rating {}", rating);
        }
    }
}
