//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: las reglas de
//! anomalías, el flujo de alquiler y las recomendaciones.

pub mod anomaly_rules;
pub mod anomaly_service;
pub mod checkout_service;
pub mod recommendation_scorer;
pub mod recommendation_service;
pub mod text_generation;

pub use anomaly_service::AnomalyService;
pub use checkout_service::{CheckoutCommand, CheckoutService, RentalDuration, RentalStore};
pub use recommendation_service::RecommendationService;
pub use text_generation::{HostedTextGenerator, TextGenerator};
