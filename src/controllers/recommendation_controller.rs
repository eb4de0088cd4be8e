use crate::dto::recommendation_dto::{RecommendationRequest, RecommendationResponse};
use crate::repositories::VehicleRepository;
use crate::services::RecommendationService;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub struct RecommendationController {
    vehicles: VehicleRepository,
    service: Arc<RecommendationService>,
}

impl RecommendationController {
    pub fn new(pool: PgPool, service: Arc<RecommendationService>) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool),
            service,
        }
    }

    /// Recomendar entre los vehículos disponibles ahora
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, AppError> {
        request.validate()?;

        let candidates = self.vehicles.list_available().await?;
        let (recommendations, source) = self
            .service
            .recommend(request.requirements.trim(), &candidates)
            .await;

        info!(
            "💡 {} recomendaciones ({:?}) entre {} vehículos disponibles",
            recommendations.len(),
            source,
            candidates.len()
        );

        Ok(RecommendationResponse {
            recommendations,
            source,
        })
    }
}
