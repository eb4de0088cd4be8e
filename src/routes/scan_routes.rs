use axum::{extract::State, middleware, routing::post, Json, Router};
use crate::controllers::scan_controller::ScanController;
use crate::dto::scan_dto::{ScanRequest, ScanResponse};
use crate::middleware::auth::dealer_only_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Escáner QR, solo dealers
pub fn create_scan_router() -> Router<AppState> {
    Router::new()
        .route("/", post(scan))
        .route_layer(middleware::from_fn(dealer_only_middleware))
}

async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let controller = ScanController::new(state.pool.clone());
    let response = controller.scan(request).await?;
    Ok(Json(response))
}
