use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Rental, Vehicle};
use crate::utils::validation::validate_not_empty;

// Texto leído del QR o tecleado a mano
#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(max = 200), custom = "validate_not_empty")]
    pub payload: String,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_rental: Option<Rental>,
}

impl ScanResponse {
    pub fn not_found() -> Self {
        Self {
            found: false,
            vehicle: None,
            active_rental: None,
        }
    }
}
