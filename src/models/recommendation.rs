//! Modelos de recomendación de vehículos

use serde::{Deserialize, Serialize};

use super::vehicle::Vehicle;

/// Origen de las recomendaciones devueltas
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Llm,
    Rules,
}

/// Vehículo recomendado con su puntuación 1-10
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub vehicle: Vehicle,
    pub reasoning: String,
    pub match_score: u8,
}
