//! Modelos de anomalías
//!
//! Las anomalías se derivan en cada consulta a partir de los alquileres
//! activos; no se persisten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::vehicle::VehicleType;

/// Tipo de anomalía
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Overdue,
    HighIdleRatio,
    NoWorkWhileRented,
    ExcessFuelPerHour,
    LongDowntime,
}

/// Severidad. `Low` no la emite ninguna regla pero existe en el resumen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Anomalía detectada en un alquiler activo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub rental_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub anomaly_type: AnomalyKind,
    pub severity: Severity,
    pub score: f64,
    pub details: String,
    pub detected_at: DateTime<Utc>,
}

/// Umbrales operativos por tipo de vehículo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub fuel_per_hour: f64,
    pub idle_ratio: f64,
}

/// Resumen de anomalías por vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalySummary {
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub total_anomalies: i64,
    pub high_severity_count: i64,
    pub medium_severity_count: i64,
    pub low_severity_count: i64,
    pub total_score: f64,
    pub avg_score: f64,
    pub anomaly_types: Vec<AnomalyKind>,
}
