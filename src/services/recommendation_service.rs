//! Servicio de recomendaciones
//!
//! Las reglas son el camino por defecto. Si hay modelo de texto configurado se
//! intenta primero; su resultado solo sustituye al de las reglas si al menos
//! una entrada resuelve a un vehículo de la lista. Sin mezcla ni reintentos.

use std::sync::Arc;
use tracing::{info, warn};

use crate::models::{Recommendation, RecommendationSource, Vehicle};
use crate::services::recommendation_scorer::{score_vehicles, MAX_RECOMMENDATIONS};
use crate::services::text_generation::{build_prompt, extract_recommendations, TextGenerator};

pub struct RecommendationService {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl RecommendationService {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Servicio que solo usa las reglas
    pub fn rules_only() -> Self {
        Self { generator: None }
    }

    pub async fn recommend(
        &self,
        requirements: &str,
        vehicles: &[Vehicle],
    ) -> (Vec<Recommendation>, RecommendationSource) {
        if vehicles.is_empty() {
            return (Vec::new(), RecommendationSource::Rules);
        }

        if let Some(generator) = &self.generator {
            match self.try_generated(generator.as_ref(), requirements, vehicles).await {
                Some(recommendations) => {
                    info!("✅ {} recomendaciones del modelo de texto", recommendations.len());
                    return (recommendations, RecommendationSource::Llm);
                }
                None => warn!("⚠️ Modelo de texto sin resultado utilizable, usando reglas"),
            }
        }

        (score_vehicles(requirements, vehicles), RecommendationSource::Rules)
    }

    async fn try_generated(
        &self,
        generator: &dyn TextGenerator,
        requirements: &str,
        vehicles: &[Vehicle],
    ) -> Option<Vec<Recommendation>> {
        let prompt = build_prompt(requirements, vehicles);
        let text = match generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("⚠️ Error del modelo de texto: {}", e);
                return None;
            }
        };

        let mut resolved: Vec<Recommendation> = extract_recommendations(&text)?
            .into_iter()
            .filter_map(|entry| {
                let vehicle = vehicles
                    .iter()
                    .find(|v| v.id.to_string() == entry.vehicle_id.trim())?;
                Some(Recommendation {
                    vehicle: vehicle.clone(),
                    reasoning: entry.reasoning,
                    match_score: entry.match_score.round().clamp(1.0, 10.0) as u8,
                })
            })
            .collect();

        if resolved.is_empty() {
            return None;
        }

        resolved.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        resolved.truncate(MAX_RECOMMENDATIONS);
        Some(resolved)
    }
}
