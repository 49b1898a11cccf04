//! Servicio de precios
//!
//! total = (tarifa diaria × días + Σ extras × días) × (1 + impuesto),
//! con días >= 1 y todos los importes redondeados a 2 decimales.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::extra::Extra;

/// 18 %
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Desglose del precio de una reserva
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub days: i64,
    pub daily_rate: Decimal,
    pub base: Decimal,
    pub extras: Vec<ExtraCharge>,
    pub extras_total: Decimal,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraCharge {
    pub code: String,
    pub daily_cost: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct PricingCalculator {
    tax_rate: Decimal,
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_TAX_RATE)
    }
}

impl PricingCalculator {
    pub fn new(tax_rate: Decimal) -> Self {
        Self {
            tax_rate: tax_rate.max(Decimal::ZERO),
        }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Días de alquiler; 0 o negativo cuenta como 1
    pub fn clamp_days(days: i64) -> i64 {
        days.max(1)
    }

    pub fn rental_days(pickup: NaiveDate, return_date: NaiveDate) -> i64 {
        Self::clamp_days((return_date - pickup).num_days())
    }

    pub fn quote(&self, daily_rate: Decimal, days: i64, extras: &[Extra]) -> PriceBreakdown {
        let days = Self::clamp_days(days);
        let day_count = Decimal::from(days);
        let daily_rate = daily_rate.max(Decimal::ZERO);

        let base = round_money(daily_rate * day_count);

        let extras: Vec<ExtraCharge> = extras
            .iter()
            .map(|extra| {
                let daily_cost = extra.daily_cost.max(Decimal::ZERO);
                ExtraCharge {
                    code: extra.code.to_string(),
                    daily_cost,
                    amount: round_money(daily_cost * day_count),
                }
            })
            .collect();
        let extras_total: Decimal = extras.iter().map(|e| e.amount).sum();

        let subtotal = base + extras_total;
        let tax = round_money(subtotal * self.tax_rate);
        let total = subtotal + tax;

        PriceBreakdown {
            days,
            daily_rate,
            base,
            extras,
            extras_total,
            subtotal,
            tax_rate: self.tax_rate,
            tax,
            total,
        }
    }

    pub fn quote_for_dates(
        &self,
        daily_rate: Decimal,
        pickup: NaiveDate,
        return_date: NaiveDate,
        extras: &[Extra],
    ) -> PriceBreakdown {
        self.quote(daily_rate, Self::rental_days(pickup, return_date), extras)
    }
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::extra;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_base_and_tax() {
        let calc = PricingCalculator::default();
        let quote = calc.quote(Decimal::new(45, 0), 3, &[]);

        assert_eq!(quote.days, 3);
        assert_eq!(quote.base, Decimal::new(135, 0));
        assert_eq!(quote.tax, Decimal::new(2430, 2));
        assert_eq!(quote.total, Decimal::new(15930, 2));
    }

    #[test]
    fn test_total_is_price_times_tax_factor() {
        let calc = PricingCalculator::default();
        let factor = Decimal::new(118, 2);
        for rate in [Decimal::new(2999, 2), Decimal::new(45, 0), Decimal::new(12050, 2)] {
            for days in 1..=30 {
                let quote = calc.quote(rate, days, &[]);
                assert_eq!(quote.base, rate * Decimal::from(days));
                assert_eq!(quote.total, round_money(quote.base * factor));
            }
        }
    }

    #[test]
    fn test_zero_or_negative_days_clamp_to_one() {
        let calc = PricingCalculator::default();
        let one = calc.quote(Decimal::new(50, 0), 1, &[]);
        assert_eq!(calc.quote(Decimal::new(50, 0), 0, &[]), one);
        assert_eq!(calc.quote(Decimal::new(50, 0), -4, &[]), one);
        assert_eq!(one.days, 1);
    }

    #[test]
    fn test_extras_are_charged_per_day() {
        let calc = PricingCalculator::default();
        let extras = extra::resolve(&["gps".to_string(), "child_seat".to_string()]).unwrap();
        let quote = calc.quote(Decimal::new(40, 0), 2, &extras);

        assert_eq!(quote.base, Decimal::new(80, 0));
        assert_eq!(quote.extras_total, Decimal::new(24, 0));
        assert_eq!(quote.subtotal, Decimal::new(104, 0));
        assert_eq!(quote.tax, Decimal::new(1872, 2));
        assert_eq!(quote.total, Decimal::new(12272, 2));
    }

    #[test]
    fn test_never_negative() {
        let calc = PricingCalculator::new(Decimal::new(-5, 1));
        let quote = calc.quote(Decimal::new(-10, 0), 3, &[]);
        assert_eq!(quote.total, Decimal::ZERO);
        assert_eq!(quote.tax_rate, Decimal::ZERO);
    }

    #[test]
    fn test_rental_days_from_dates() {
        assert_eq!(PricingCalculator::rental_days(d("2025-01-10"), d("2025-01-12")), 2);
        assert_eq!(PricingCalculator::rental_days(d("2025-01-10"), d("2025-01-10")), 1);
        assert_eq!(PricingCalculator::rental_days(d("2025-01-12"), d("2025-01-10")), 1);
    }
}
