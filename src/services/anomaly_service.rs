//! Consultas de anomalías
//!
//! Las tres entradas de lectura. Sin efectos secundarios: una lista vacía
//! significa que no hay anomalías.

use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Anomaly, AnomalySummary};
use crate::repositories::RentalRepository;
use crate::services::anomaly_rules::{detect_anomalies, summarize};
use crate::utils::errors::AppResult;

pub struct AnomalyService {
    rentals: RentalRepository,
}

impl AnomalyService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool),
        }
    }

    /// Todas las anomalías, score desc y luego detected_at desc
    pub async fn get_rental_anomalies(&self) -> AppResult<Vec<Anomaly>> {
        let snapshots = self.rentals.active_snapshots(None).await?;
        let anomalies = detect_anomalies(&snapshots, Utc::now());
        debug!(
            "🔍 {} anomalías en {} alquileres activos",
            anomalies.len(),
            snapshots.len()
        );
        Ok(anomalies)
    }

    pub async fn get_vehicle_anomalies(&self, vehicle_id: Uuid) -> AppResult<Vec<Anomaly>> {
        let snapshots = self.rentals.active_snapshots(Some(vehicle_id)).await?;
        Ok(detect_anomalies(&snapshots, Utc::now()))
    }

    /// Resumen por vehículo. Solo los vehículos alquilados tienen alquiler activo.
    pub async fn get_anomaly_summary(&self) -> AppResult<Vec<AnomalySummary>> {
        let anomalies = self.get_rental_anomalies().await?;
        Ok(summarize(&anomalies))
    }
}
