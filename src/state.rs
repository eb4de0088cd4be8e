//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::EnvironmentConfig;
use crate::middleware::rate_limit::RateLimitState;
use crate::services::{HostedTextGenerator, RecommendationService, TextGenerator};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub rate_limit: RateLimitState,
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> anyhow::Result<Self> {
        let generator: Option<Arc<dyn TextGenerator>> = match &config.llm_api_token {
            Some(token) => {
                info!("🤖 Modelo de texto configurado: {}", config.llm_api_url);
                let generator: Arc<dyn TextGenerator> = Arc::new(HostedTextGenerator::new(
                    config.llm_api_url.clone(),
                    token.clone(),
                    config.llm_timeout_secs,
                )?);
                Some(generator)
            }
            None => {
                warn!("⚠️ LLM_API_TOKEN no definido, recomendaciones solo por reglas");
                None
            }
        };

        Ok(Self {
            rate_limit: RateLimitState::from_config(&config),
            recommendations: Arc::new(RecommendationService::new(generator)),
            pool,
            config,
        })
    }
}
