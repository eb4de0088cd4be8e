use crate::models::{Anomaly, AnomalySummary};
use crate::repositories::VehicleRepository;
use crate::services::AnomalyService;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;

pub struct AnomalyController {
    service: AnomalyService,
    vehicles: VehicleRepository,
}

impl AnomalyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: AnomalyService::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Anomaly>, AppError> {
        self.service.get_rental_anomalies().await
    }

    pub async fn list_for_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Anomaly>, AppError> {
        if !self.vehicles.exists(vehicle_id).await? {
            return Err(not_found_error("Vehicle", &vehicle_id.to_string()));
        }
        self.service.get_vehicle_anomalies(vehicle_id).await
    }

    pub async fn summary(&self) -> Result<Vec<AnomalySummary>, AppError> {
        self.service.get_anomaly_summary().await
    }
}
