//! Middleware de Rate Limiting
//!
//! Ventana fija en memoria por usuario autenticado. Protege los endpoints
//! que pueden llamar a la API de pago del modelo de texto. Debe montarse
//! detrás de `auth_middleware`.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EnvironmentConfig;
use crate::middleware::auth::AuthenticatedUser;
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        )
    }

    /// Verificar si un cliente ha excedido el límite
    pub async fn check_rate_limit(&self, client: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(client.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// Clave del cliente: el id del usuario autenticado
fn client_key(request: &Request) -> Result<String, AppError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .map(|user| user.user_id.to_string())
        .ok_or_else(|| AppError::Unauthorized("Usuario no autenticado".to_string()))
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_key(&request)?;

    if let Err(e) = rate_limit_state.check_rate_limit(&client).await {
        warn!("🚦 Rate limit excedido para {}", client);
        return Err(e);
    }

    Ok(next.run(request).await)
}
