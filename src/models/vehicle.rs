//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y el enum de tipos de maquinaria.
//! `is_rented` no es una columna: se deriva de la existencia de un alquiler activo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::utils::validation::parse_leading_number;

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Excavator,
    Bulldozer,
    Crane,
    Truck,
    Forklift,
    Loader,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Excavator,
        VehicleType::Bulldozer,
        VehicleType::Crane,
        VehicleType::Truck,
        VehicleType::Forklift,
        VehicleType::Loader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excavator => "excavator",
            Self::Bulldozer => "bulldozer",
            Self::Crane => "crane",
            Self::Truck => "truck",
            Self::Forklift => "forklift",
            Self::Loader => "loader",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vehicle principal - columnas de la tabla vehicles más el estado derivado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub vehicle_type: VehicleType,
    pub name: String,
    pub capacity: String,
    pub qr_code: String,
    pub location: String,
    pub fuel_type: String,
    pub is_rented: bool,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Capacidad numérica ("35 ton" -> 35), si el texto empieza con un número
    pub fn capacity_value(&self) -> Option<u32> {
        parse_leading_number(&self.capacity)
    }
}

#[cfg(test)]
pub(crate) fn sample_vehicle(vehicle_type: VehicleType, capacity: &str, location: &str, fuel_type: &str) -> Vehicle {
    Vehicle {
        id: Uuid::new_v4(),
        vehicle_type,
        name: format!("{} {}", vehicle_type, capacity),
        capacity: capacity.to_string(),
        qr_code: Uuid::new_v4().to_string(),
        location: location.to_string(),
        fuel_type: fuel_type.to_string(),
        is_rented: false,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_value() {
        let v = sample_vehicle(VehicleType::Excavator, "35 ton", "Site A", "diesel");
        assert_eq!(v.capacity_value(), Some(35));

        let v = sample_vehicle(VehicleType::Forklift, "heavy duty", "Warehouse", "electric");
        assert_eq!(v.capacity_value(), None);
    }

    #[test]
    fn test_vehicle_type_serde_lowercase() {
        let json = serde_json::to_string(&VehicleType::Bulldozer).unwrap();
        assert_eq!(json, "\"bulldozer\"");
        let parsed: VehicleType = serde_json::from_str("\"forklift\"").unwrap();
        assert_eq!(parsed, VehicleType::Forklift);
    }

    #[test]
    fn test_vehicle_serializes_type_field() {
        let v = sample_vehicle(VehicleType::Crane, "20 ton", "Site B", "diesel");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["type"], "crane");
        assert_eq!(json["is_rented"], false);
    }
}
