//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean
//! al schema PostgreSQL y los tipos derivados (anomalías, recomendaciones).

pub mod anomaly;
pub mod profile;
pub mod recommendation;
pub mod rental;
pub mod vehicle;

pub use anomaly::{Anomaly, AnomalyKind, AnomalySummary, Severity, Thresholds};
pub use profile::{Profile, UserRole};
pub use recommendation::{Recommendation, RecommendationSource};
pub use rental::{ActiveRentalSnapshot, NewRental, Rental, UsageMetrics};
pub use vehicle::{Vehicle, VehicleType};
