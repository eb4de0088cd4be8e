//! Rutas HTTP
//!
//! `/health` es público; todo lo que cuelga de `/api` pasa por el
//! middleware de autenticación.

pub mod anomaly_routes;
pub mod profile_routes;
pub mod recommendation_routes;
pub mod rental_routes;
pub mod scan_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::{auth::auth_middleware, cors::cors_middleware};
use crate::state::AppState;

pub const SERVICE_NAME: &str = "equipment-rental-api";

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/profile", profile_routes::create_profile_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/rentals", rental_routes::create_rental_router())
        .nest("/anomalies", anomaly_routes::create_anomaly_router())
        .nest(
            "/recommendations",
            recommendation_routes::create_recommendation_router(&state),
        )
        .nest("/scan", scan_routes::create_scan_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_middleware(&state.config.cors_origins))
        .with_state(state)
}

/// Health check
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
