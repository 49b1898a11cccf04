use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

// Resumen del dashboard de administración
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub total_users: usize,
    pub total_bookings: usize,
    pub bookings_by_status: BTreeMap<String, usize>,
    pub total_revenue: Decimal,
    pub total_reviews: usize,
}
