use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleQuery};
use crate::dto::ApiResponse;
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        // Verificar que el código QR no exista
        if let Some(qr_code) = request.qr_code.as_deref() {
            if self.repository.qr_code_exists(qr_code, None).await? {
                return Err(conflict_error("Vehicle", "qr_code", qr_code));
            }
        }

        let vehicle = self
            .repository
            .create(
                request.vehicle_type,
                request.name.trim().to_string(),
                request.capacity,
                request.qr_code.map(|qr| qr.trim().to_string()),
                request.location,
                request.fuel_type,
            )
            .await?;

        info!("🚜 Vehículo creado: {} ({})", vehicle.name, vehicle.vehicle_type.as_str());

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn list(&self, query: VehicleQuery) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list(query.vehicle_type, query.available).await
    }

    pub async fn list_available(&self) -> Result<Vec<Vehicle>, AppError> {
        self.repository.list_available().await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if let Some(qr_code) = request.qr_code.as_deref() {
            if self.repository.qr_code_exists(qr_code, Some(id)).await? {
                return Err(conflict_error("Vehicle", "qr_code", qr_code));
            }
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.vehicle_type,
                request.name.map(|name| name.trim().to_string()),
                request.capacity,
                request.qr_code.map(|qr| qr.trim().to_string()),
                request.location,
                request.fuel_type,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }
}
