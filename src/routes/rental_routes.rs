use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Extension, Json, Router,
};
use crate::controllers::rental_controller::RentalController;
use crate::dto::rental_dto::{CheckoutRequest, UsageUpdateRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Rental;
use crate::state::AppState;
use crate::utils::errors::AppError;
use uuid::Uuid;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals))
        .route("/active", get(list_active_rentals))
        .route("/checkout", post(checkout))
        .route("/:id/checkin", post(checkin))
        .route("/:id/usage", put(update_usage))
}

async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.checkout(&user, request).await?;
    Ok(Json(response))
}

async fn checkin(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.checkin(&user, id).await?;
    Ok(Json(response))
}

async fn list_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Rental>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list(&user).await?;
    Ok(Json(response))
}

async fn list_active_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<Rental>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list_active(&user).await?;
    Ok(Json(response))
}

async fn update_usage(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UsageUpdateRequest>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.update_usage(&user, id, request).await?;
    Ok(Json(response))
}
