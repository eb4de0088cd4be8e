use axum::{extract::State, routing::get, Extension, Json, Router};
use crate::controllers::profile_controller::ProfileController;
use crate::dto::profile_dto::UpdateProfileRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Profile;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_profile_router() -> Router<AppState> {
    Router::new().route("/me", get(get_profile).put(update_profile))
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Profile>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.get_me(&user).await?;
    Ok(Json(response))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<Profile>>, AppError> {
    let controller = ProfileController::new(state.pool.clone());
    let response = controller.update_me(&user, request).await?;
    Ok(Json(response))
}
