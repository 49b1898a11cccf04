//! Controllers
//!
//! Lógica de cada endpoint por encima de los repositorios: permisos,
//! validaciones cruzadas y logging de eventos de negocio.

pub mod auth_controller;
pub mod booking_controller;
pub mod dashboard_controller;
pub mod review_controller;
pub mod user_controller;
pub mod vehicle_controller;
