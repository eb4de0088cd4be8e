use crate::dto::rental_dto::{CheckoutRequest, UsageUpdateRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{Rental, UsageMetrics};
use crate::repositories::RentalRepository;
use crate::services::CheckoutService;
use crate::utils::errors::{bad_request_error, AppError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct RentalController {
    pool: PgPool,
}

impl RentalController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> RentalRepository {
        RentalRepository::new(self.pool.clone())
    }

    pub async fn checkout(
        &self,
        user: &AuthenticatedUser,
        request: CheckoutRequest,
    ) -> Result<ApiResponse<Rental>, AppError> {
        request.validate()?;

        let service = CheckoutService::new(self.repository());
        let rental = service.check_out(user, request.into_command()).await?;

        Ok(ApiResponse::success_with_message(
            rental,
            "Vehículo alquilado exitosamente".to_string(),
        ))
    }

    pub async fn checkin(
        &self,
        user: &AuthenticatedUser,
        rental_id: Uuid,
    ) -> Result<ApiResponse<Rental>, AppError> {
        let service = CheckoutService::new(self.repository());
        let rental = service.check_in(user, rental_id).await?;

        Ok(ApiResponse::success_with_message(
            rental,
            "Vehículo devuelto exitosamente".to_string(),
        ))
    }

    /// Alquileres propios; un dealer ve todos
    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Rental>, AppError> {
        if user.is_dealer() {
            self.repository().list_all().await
        } else {
            self.repository().list_for_user(user.user_id).await
        }
    }

    pub async fn list_active(&self, user: &AuthenticatedUser) -> Result<Vec<Rental>, AppError> {
        let owner = if user.is_dealer() { None } else { Some(user.user_id) };
        self.repository().list_active(owner).await
    }

    pub async fn update_usage(
        &self,
        user: &AuthenticatedUser,
        rental_id: Uuid,
        request: UsageUpdateRequest,
    ) -> Result<ApiResponse<Rental>, AppError> {
        user.require_dealer("update rental usage")?;
        request.validate()?;

        let usage = UsageMetrics::from(request);
        if usage.is_empty() {
            return Err(bad_request_error("At least one usage metric is required"));
        }

        let rental = self.repository().update_usage(rental_id, &usage).await?;
        info!("📊 Métricas de uso actualizadas para alquiler {}", rental.id);

        Ok(ApiResponse::success_with_message(
            rental,
            "Métricas de uso actualizadas".to_string(),
        ))
    }
}
