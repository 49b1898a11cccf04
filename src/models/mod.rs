//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que guarda el store en memoria.

pub mod extra;
pub mod reservation;
pub mod review;
pub mod user;
pub mod vehicle;
