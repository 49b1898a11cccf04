//! Backend de alquiler de coches
//!
//! API REST/JSON: flota, disponibilidad, presupuestos, reservas, pagos
//! simulados, reviews y dashboard de administración sobre un store en memoria.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use config::EnvironmentConfig;
pub use database::Store;
pub use routes::create_router;
pub use state::AppState;
