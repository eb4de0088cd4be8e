//! Controladores
//!
//! Se construyen por request a partir del pool y orquestan validación,
//! repositorios y servicios.

pub mod anomaly_controller;
pub mod profile_controller;
pub mod recommendation_controller;
pub mod rental_controller;
pub mod scan_controller;
pub mod vehicle_controller;
