//! Middleware del sistema
//!
//! Este módulo contiene los extractores de autenticación y la configuración
//! de CORS.

pub mod auth;
pub mod cors;

pub use auth::{AdminUser, AuthenticatedUser};
pub use cors::cors_layer;
