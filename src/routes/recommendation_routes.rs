use axum::{extract::State, middleware, routing::post, Json, Router};
use crate::controllers::recommendation_controller::RecommendationController;
use crate::dto::recommendation_dto::{RecommendationRequest, RecommendationResponse};
use crate::middleware::rate_limit::rate_limit_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_recommendation_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(recommend))
        .route_layer(middleware::from_fn_with_state(
            state.rate_limit.clone(),
            rate_limit_middleware,
        ))
}

async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let controller = RecommendationController::new(state.pool.clone(), state.recommendations.clone());
    let response = controller.recommend(request).await?;
    Ok(Json(response))
}
