//! Data transfer objects
//!
//! Payloads de entrada (validados con `validator`) y de salida de la API.

pub mod auth_dto;
pub mod booking_dto;
pub mod common_dto;
pub mod dashboard_dto;
pub mod review_dto;
pub mod user_dto;
pub mod vehicle_dto;
