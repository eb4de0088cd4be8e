//! Modelo de Rental
//!
//! Un alquiler con `check_in_date` nulo es un alquiler activo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::vehicle::VehicleType;

/// Rental - mapea exactamente a la tabla rentals
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub check_out_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
    pub check_in_date: Option<DateTime<Utc>>,
    pub idle_time: f64,
    pub working_time: f64,
    pub fuel_usage: f64,
    pub downtime: f64,
    pub no_operating_days: i32,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_active(&self) -> bool {
        self.check_in_date.is_none()
    }
}

/// Datos para insertar un alquiler nuevo
#[derive(Debug, Clone)]
pub struct NewRental {
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub check_out_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
}

/// Métricas acumuladas de uso de un alquiler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageMetrics {
    pub idle_time: Option<f64>,
    pub working_time: Option<f64>,
    pub fuel_usage: Option<f64>,
    pub downtime: Option<f64>,
    pub no_operating_days: Option<i32>,
}

impl UsageMetrics {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Alquiler activo unido a su vehículo, entrada del motor de anomalías
#[derive(Debug, Clone, FromRow)]
pub struct ActiveRentalSnapshot {
    pub rental_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub vehicle_type: VehicleType,
    pub check_out_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
    pub idle_time: f64,
    pub working_time: f64,
    pub fuel_usage: f64,
    pub downtime: f64,
}
