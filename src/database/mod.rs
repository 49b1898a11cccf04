//! Módulo de base de datos
//!
//! Store en memoria compartido por el proceso y datos iniciales.

pub mod seed;
pub mod store;

pub use store::{Store, Tables};
