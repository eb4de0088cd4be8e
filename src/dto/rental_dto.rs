use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::UsageMetrics;
use crate::services::checkout_service::{CheckoutCommand, RentalDuration};

// Request de check-out
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub vehicle_id: Uuid,
    pub user_id: Option<Uuid>,
    #[validate(range(min = 1, max = 365))]
    pub duration_days: Option<i64>,
    #[validate(range(min = 1, max = 24))]
    pub duration_months: Option<u32>,
}

impl CheckoutRequest {
    /// Meses si vienen, si no días, si no la duración por defecto
    pub fn into_command(self) -> CheckoutCommand {
        let duration = match (self.duration_months, self.duration_days) {
            (Some(months), _) => RentalDuration::Months(months),
            (None, Some(days)) => RentalDuration::Days(days),
            (None, None) => RentalDuration::default(),
        };

        CheckoutCommand {
            vehicle_id: self.vehicle_id,
            renter_id: self.user_id,
            duration,
        }
    }
}

// Request para registrar las métricas de uso acumuladas
#[derive(Debug, Deserialize, Validate)]
pub struct UsageUpdateRequest {
    #[validate(range(min = 0.0))]
    pub idle_time: Option<f64>,
    #[validate(range(min = 0.0))]
    pub working_time: Option<f64>,
    #[validate(range(min = 0.0))]
    pub fuel_usage: Option<f64>,
    #[validate(range(min = 0.0))]
    pub downtime: Option<f64>,
    #[validate(range(min = 0))]
    pub no_operating_days: Option<i32>,
}

impl From<UsageUpdateRequest> for UsageMetrics {
    fn from(request: UsageUpdateRequest) -> Self {
        UsageMetrics {
            idle_time: request.idle_time,
            working_time: request.working_time,
            fuel_usage: request.fuel_usage,
            downtime: request.downtime,
            no_operating_days: request.no_operating_days,
        }
    }
}
