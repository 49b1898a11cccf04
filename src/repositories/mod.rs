//! Repositorios sobre el store en memoria

pub mod booking_repository;
pub mod review_repository;
pub mod user_repository;
pub mod vehicle_repository;
