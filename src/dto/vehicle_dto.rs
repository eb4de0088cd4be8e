use serde::Deserialize;
use validator::Validate;

use crate::models::VehicleType;
use crate::utils::validation::validate_not_empty;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub capacity: String,
    #[validate(length(min = 1, max = 200), custom = "validate_not_empty")]
    pub qr_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[validate(length(min = 1, max = 30))]
    pub fuel_type: String,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    #[validate(length(min = 1, max = 100), custom = "validate_not_empty")]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub capacity: Option<String>,
    #[validate(length(min = 1, max = 200), custom = "validate_not_empty")]
    pub qr_code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub fuel_type: Option<String>,
}

// Filtros del listado
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    pub vehicle_type: Option<VehicleType>,
    pub available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_uses_type_field() {
        let request: CreateVehicleRequest = serde_json::from_str(
            r#"{"type": "crane", "name": "CR-02", "capacity": "40 ton",
                "location": "Site C", "fuel_type": "diesel"}"#,
        )
        .unwrap();
        assert_eq!(request.vehicle_type, VehicleType::Crane);
        assert!(request.qr_code.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let request = CreateVehicleRequest {
            vehicle_type: VehicleType::Truck,
            name: "   ".to_string(),
            capacity: "20 ton".to_string(),
            qr_code: None,
            location: "Site A".to_string(),
            fuel_type: "diesel".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_type_fails_to_parse() {
        let result = serde_json::from_str::<CreateVehicleRequest>(
            r#"{"type": "tractor", "name": "T", "capacity": "1", "location": "A", "fuel_type": "diesel"}"#,
        );
        assert!(result.is_err());
    }
}
