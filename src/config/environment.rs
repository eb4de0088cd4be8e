//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Endpoint por defecto del modelo de generación de texto
pub const DEFAULT_LLM_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    pub llm_api_url: String,
    pub llm_api_token: Option<String>,
    pub llm_timeout_secs: u64,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: parse_or("PORT", 3000)?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", 30)?,
            rate_limit_window: parse_or("RATE_LIMIT_WINDOW", 60)?,
            llm_api_url: env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_LLM_API_URL.to_string()),
            llm_api_token: env::var("LLM_API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", 20)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Nivel de logging para tracing_subscriber
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", key)),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
