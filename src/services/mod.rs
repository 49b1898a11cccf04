//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: disponibilidad,
//! precios, ratings y autenticación.

pub mod auth_service;
pub mod availability_service;
pub mod pricing_service;
pub mod rating_service;
