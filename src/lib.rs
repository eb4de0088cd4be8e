//! Backend de alquiler de maquinaria
//!
//! API REST (axum + sqlx) para la flota de vehículos, los alquileres con
//! check-out/check-in por QR, la detección de anomalías de uso y las
//! recomendaciones de vehículos.

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
pub use routes::create_router;
pub use state::AppState;
