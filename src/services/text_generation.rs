//! Cliente del modelo de generación de texto hospedado
//!
//! Se usa como mejora opcional de las recomendaciones. Cualquier fallo se
//! devuelve como error y el llamador vuelve a las reglas.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::models::Vehicle;
use crate::utils::errors::{AppError, AppResult};

lazy_static! {
    static ref JSON_ARRAY: Regex = Regex::new(r"(?s)\[.*\]").expect("valid regex");
}

/// Generador de texto a partir de un prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

/// Cliente HTTP del endpoint de inferencia (bearer token)
pub struct HostedTextGenerator {
    client: Client,
    api_url: String,
    api_token: String,
}

impl HostedTextGenerator {
    pub fn new(api_url: String, api_token: String, timeout_secs: u64) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url,
            api_token,
        })
    }
}

#[async_trait]
impl TextGenerator for HostedTextGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        info!("🤖 Consultando modelo de texto: {}", self.api_url);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&json!({
                "inputs": prompt,
                "parameters": {
                    "max_new_tokens": 800,
                    "temperature": 0.3,
                    "return_full_text": false
                }
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Text generation failed with status {}: {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Invalid response body: {}", e)))?;

        generated_text(&body)
            .ok_or_else(|| AppError::ExternalApi("Response has no generated_text".to_string()))
    }
}

/// Extraer `generated_text` de `[{..}]` o `{..}`
fn generated_text(body: &Value) -> Option<String> {
    let item = match body {
        Value::Array(items) => items.first()?,
        other => other,
    };
    item.get("generated_text")?.as_str().map(str::to_string)
}

/// Entrada esperada en la respuesta del modelo
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedRecommendation {
    #[serde(rename = "vehicleId")]
    pub vehicle_id: String,
    #[serde(default)]
    pub reasoning: String,
    #[serde(rename = "matchScore", default)]
    pub match_score: f64,
}

/// Buscar un array JSON dentro del texto generado.
///
/// Las entradas que no encajan se descartan una a una; None solo si no hay
/// array.
pub fn extract_recommendations(text: &str) -> Option<Vec<GeneratedRecommendation>> {
    let raw = JSON_ARRAY.find(text)?.as_str();
    let entries: Vec<Value> = serde_json::from_str(raw).ok()?;

    let parsed = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<GeneratedRecommendation>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Entrada de recomendación descartada: {}", e);
                None
            }
        })
        .collect();

    Some(parsed)
}

/// Prompt en lenguaje natural con la lista de vehículos y los requisitos
pub fn build_prompt(requirements: &str, vehicles: &[Vehicle]) -> String {
    let listing = vehicles
        .iter()
        .map(|v| {
            format!(
                "- ID: {}, Type: {}, Name: {}, Capacity: {}, Location: {}, Fuel: {}",
                v.id, v.vehicle_type, v.name, v.capacity, v.location, v.fuel_type
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an equipment rental assistant. Given the customer's requirements and the \
         available vehicles, pick the 3 best matches.\n\n\
         Requirements: {}\n\n\
         Available vehicles:\n{}\n\n\
         Respond only with a JSON array of objects with the fields \
         \"vehicleId\", \"reasoning\" and \"matchScore\" (1-10).",
        requirements, listing
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::sample_vehicle;
    use crate::models::VehicleType;

    #[test]
    fn test_extract_embedded_array() {
        let text = r#"Sure! Here are my picks:
[{"vehicleId": "abc", "reasoning": "Fits", "matchScore": 9},
 {"vehicleId": "def", "reasoning": "Ok", "matchScore": 6}]
Hope this helps."#;
        let parsed = extract_recommendations(text).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].vehicle_id, "abc");
        assert_eq!(parsed[0].match_score, 9.0);
    }

    #[test]
    fn test_extract_rejects_garbage() {
        assert!(extract_recommendations("no json here").is_none());
        assert!(extract_recommendations("[not valid json]").is_none());
        assert_eq!(
            extract_recommendations(r#"[{"reasoning": "missing id"}]"#).map(|v| v.len()),
            Some(0)
        );
    }

    #[test]
    fn test_extract_skips_malformed_entries() {
        let text = r#"[{"vehicleId": "abc", "reasoning": "good", "matchScore": 8},
                      {"reasoning": "no id", "matchScore": 3},
                      {"vehicleId": "def", "matchScore": "high"}]"#;
        let parsed = extract_recommendations(text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].vehicle_id, "abc");
        assert_eq!(parsed[0].match_score, 8.0);
    }

    #[test]
    fn test_generated_text_shapes() {
        let array = json!([{ "generated_text": "hello" }]);
        assert_eq!(generated_text(&array).as_deref(), Some("hello"));

        let object = json!({ "generated_text": "hi" });
        assert_eq!(generated_text(&object).as_deref(), Some("hi"));

        assert!(generated_text(&json!({ "error": "loading" })).is_none());
        assert!(generated_text(&json!([])).is_none());
    }

    #[test]
    fn test_prompt_lists_vehicles() {
        let v = sample_vehicle(VehicleType::Crane, "20 ton", "Site B", "diesel");
        let prompt = build_prompt("need a crane", &[v.clone()]);
        assert!(prompt.contains(&v.id.to_string()));
        assert!(prompt.contains("need a crane"));
        assert!(prompt.contains("matchScore"));
    }
}
