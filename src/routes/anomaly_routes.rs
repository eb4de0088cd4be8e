use axum::{
    extract::{Path, State},
    middleware,
    routing::get,
    Json, Router,
};
use crate::controllers::anomaly_controller::AnomalyController;
use crate::middleware::auth::dealer_only_middleware;
use crate::models::{Anomaly, AnomalySummary};
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Rutas de anomalías, solo dealers
pub fn create_anomaly_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_anomalies))
        .route("/summary", get(anomaly_summary))
        .route("/vehicle/:id", get(vehicle_anomalies))
        .route_layer(middleware::from_fn(dealer_only_middleware))
}

async fn list_anomalies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Anomaly>>, AppError> {
    let controller = AnomalyController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn vehicle_anomalies(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Anomaly>>, AppError> {
    let controller = AnomalyController::new(state.pool.clone());
    let response = controller.list_for_vehicle(id).await?;
    Ok(Json(response))
}

async fn anomaly_summary(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnomalySummary>>, AppError> {
    let controller = AnomalyController::new(state.pool.clone());
    let response = controller.summary().await?;
    Ok(Json(response))
}
