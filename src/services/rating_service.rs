//! Agregación de ratings
//!
//! El rating visible de un vehículo es la media de todas sus reviews,
//! redondeada a un decimal, junto con el número de reviews.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub average: f64,
    pub count: u32,
}

impl RatingSummary {
    pub const EMPTY: RatingSummary = RatingSummary {
        average: 0.0,
        count: 0,
    };
}

/// Recalcula media y número de reviews. La suma es entera, así que el
/// resultado no depende del orden de inserción.
pub fn aggregate<I>(ratings: I) -> RatingSummary
where
    I: IntoIterator<Item = u8>,
{
    let (sum, count) = ratings
        .into_iter()
        .fold((0u64, 0u32), |(sum, count), r| (sum + u64::from(r), count + 1));

    if count == 0 {
        return RatingSummary::EMPTY;
    }

    let mean = sum as f64 / f64::from(count);
    let average = ((mean * 10.0).round() / 10.0).clamp(0.0, 5.0);

    RatingSummary { average, count }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_example() {
        let summary = aggregate([5, 3, 4]);
        assert_eq!(summary.average, 4.0);
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_order_independent() {
        let orders: [[u8; 3]; 6] = [
            [5, 3, 4],
            [5, 4, 3],
            [3, 5, 4],
            [3, 4, 5],
            [4, 5, 3],
            [4, 3, 5],
        ];
        for order in orders {
            assert_eq!(aggregate(order), aggregate([5, 3, 4]));
        }
    }

    #[test]
    fn test_idempotent() {
        let ratings = vec![1u8, 2, 2, 5];
        assert_eq!(aggregate(ratings.clone()), aggregate(ratings));
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 13 / 3 = 4.333..
        assert_eq!(aggregate([5, 4, 4]).average, 4.3);
        // 14 / 3 = 4.666..
        assert_eq!(aggregate([5, 5, 4]).average, 4.7);
        assert_eq!(aggregate([1, 2]).average, 1.5);
    }

    #[test]
    fn test_empty() {
        assert_eq!(aggregate(Vec::<u8>::new()), RatingSummary::EMPTY);
    }
}
