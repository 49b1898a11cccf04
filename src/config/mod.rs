//! Configuración del proyecto
//!
//! Este módulo contiene la configuración del entorno y del servidor.

pub mod environment;

pub use environment::*;
