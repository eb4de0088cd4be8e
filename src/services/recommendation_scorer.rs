//! Puntuación de vehículos por reglas
//!
//! Cada vehículo parte de 5 puntos y suma o resta según palabras clave
//! encontradas en el texto de requisitos. Resultado acotado a [1, 10].

use crate::models::{Recommendation, Vehicle, VehicleType};

const BASE_SCORE: i32 = 5;
const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;
const HEAVY_CAPACITY: u32 = 30;
const LIGHT_CAPACITY: u32 = 20;
const SITES: [&str; 3] = ["site a", "site b", "site c"];
const FUEL_TYPES: [&str; 2] = ["electric", "diesel"];

pub const MAX_RECOMMENDATIONS: usize = 3;
pub const DEFAULT_REASONING: &str = "General-purpose option available for your requirements.";

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Puntuación y razones de un vehículo frente a los requisitos (ya en minúsculas)
pub fn score_vehicle(requirements: &str, vehicle: &Vehicle) -> (i32, Vec<String>) {
    let mut score = BASE_SCORE;
    let mut reasons = Vec::new();
    let vehicle_type = vehicle.vehicle_type;

    if requirements.contains(vehicle_type.as_str()) {
        score += 3;
        reasons.push(format!("Exact match for requested type ({})", vehicle_type));
    }

    if let Some(capacity) = vehicle.capacity_value() {
        if contains_any(requirements, &["heavy", "large"]) {
            if capacity > HEAVY_CAPACITY {
                score += 2;
                reasons.push(format!("High capacity ({}) suits heavy work", vehicle.capacity));
            } else {
                score -= 2;
            }
        }
        if contains_any(requirements, &["small", "light"]) {
            if capacity < LIGHT_CAPACITY {
                score += 2;
                reasons.push(format!("Compact capacity ({}) suits light work", vehicle.capacity));
            } else {
                score -= 2;
            }
        }
    }

    let location = vehicle.location.to_lowercase();
    for site in SITES {
        if requirements.contains(site) && location.contains(site) {
            score += 2;
            reasons.push(format!("Located at {}", vehicle.location));
        }
    }

    let fuel = vehicle.fuel_type.to_lowercase();
    for fuel_type in FUEL_TYPES {
        if requirements.contains(fuel_type) && fuel.contains(fuel_type) {
            score += 1;
            reasons.push(format!("Runs on {} as requested", fuel_type));
        }
    }

    let domain_bonus = match vehicle_type {
        VehicleType::Excavator | VehicleType::Bulldozer
            if contains_any(requirements, &["construction", "building"]) => 2,
        VehicleType::Crane if contains_any(requirements, &["construction", "building"]) => 1,
        VehicleType::Forklift if contains_any(requirements, &["warehouse", "storage"]) => 2,
        VehicleType::Truck if contains_any(requirements, &["transport", "hauling"]) => 2,
        _ => 0,
    };
    if domain_bonus > 0 {
        score += domain_bonus;
        reasons.push(format!("Well suited for this kind of job ({})", vehicle_type));
    }

    (score.clamp(MIN_SCORE, MAX_SCORE), reasons)
}

/// Top 3 vehículos por puntuación; empates en orden de entrada
pub fn score_vehicles(requirements: &str, vehicles: &[Vehicle]) -> Vec<Recommendation> {
    let requirements = requirements.to_lowercase();

    let mut scored: Vec<Recommendation> = vehicles
        .iter()
        .map(|vehicle| {
            let (score, reasons) = score_vehicle(&requirements, vehicle);
            let reasoning = if reasons.is_empty() {
                DEFAULT_REASONING.to_string()
            } else {
                format!("{}.", reasons.join(". "))
            };
            Recommendation {
                vehicle: vehicle.clone(),
                reasoning,
                match_score: score as u8,
            }
        })
        .collect();

    // sort_by es estable
    scored.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    scored.truncate(MAX_RECOMMENDATIONS);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::sample_vehicle;

    #[test]
    fn test_heavy_excavator_at_site_a_is_clamped() {
        let excavator = sample_vehicle(VehicleType::Excavator, "35 ton", "Site A", "diesel");
        let (score, reasons) = score_vehicle(
            &"I need a heavy excavator at Site A".to_lowercase(),
            &excavator,
        );
        assert_eq!(score, 10);
        assert_eq!(reasons.len(), 3);
    }

    #[test]
    fn test_empty_requirements_yield_base_score() {
        let vehicles = vec![
            sample_vehicle(VehicleType::Excavator, "35 ton", "Site A", "diesel"),
            sample_vehicle(VehicleType::Forklift, "3 ton", "Warehouse", "electric"),
            sample_vehicle(VehicleType::Truck, "40 ton", "Site C", "diesel"),
        ];

        let results = score_vehicles("", &vehicles);
        assert_eq!(results.len(), 3);
        for (result, vehicle) in results.iter().zip(&vehicles) {
            assert_eq!(result.match_score, 5);
            assert_eq!(result.reasoning, DEFAULT_REASONING);
            assert_eq!(result.vehicle.id, vehicle.id);
        }
    }

    #[test]
    fn test_never_more_than_three_and_scores_in_range() {
        let vehicles: Vec<Vehicle> = VehicleType::ALL
            .iter()
            .map(|t| sample_vehicle(*t, "10 ton", "Site B", "electric"))
            .collect();

        for text in [
            "",
            "small light electric forklift for warehouse storage at site b",
            "HEAVY LARGE crane truck bulldozer excavator construction hauling",
            "???",
        ] {
            let results = score_vehicles(text, &vehicles);
            assert!(results.len() <= MAX_RECOMMENDATIONS);
            assert!(results.iter().all(|r| (1..=10).contains(&r.match_score)));
        }
    }

    #[test]
    fn test_light_request_penalizes_big_machines() {
        let big = sample_vehicle(VehicleType::Crane, "50 ton", "Depot", "diesel");
        let (score, _) = score_vehicle("small job", &big);
        assert_eq!(score, 3);
    }

    #[test]
    fn test_unparsable_capacity_is_neutral() {
        let v = sample_vehicle(VehicleType::Loader, "n/a", "Depot", "diesel");
        let (score, reasons) = score_vehicle("heavy", &v);
        assert_eq!(score, 5);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_domain_keywords() {
        let forklift = sample_vehicle(VehicleType::Forklift, "n/a", "Depot", "lpg");
        assert_eq!(score_vehicle("warehouse work", &forklift).0, 7);

        let truck = sample_vehicle(VehicleType::Truck, "n/a", "Depot", "lpg");
        assert_eq!(score_vehicle("hauling gravel", &truck).0, 7);

        let crane = sample_vehicle(VehicleType::Crane, "n/a", "Depot", "lpg");
        assert_eq!(score_vehicle("building a tower", &crane).0, 6);
    }

    #[test]
    fn test_fuel_match() {
        let v = sample_vehicle(VehicleType::Forklift, "n/a", "Depot", "Electric");
        let (score, reasons) = score_vehicle("electric please", &v);
        assert_eq!(score, 6);
        assert_eq!(reasons.len(), 1);
    }

    #[test]
    fn test_stable_order_on_ties() {
        let vehicles: Vec<Vehicle> = (0..5)
            .map(|_| sample_vehicle(VehicleType::Truck, "n/a", "Depot", "diesel"))
            .collect();
        let results = score_vehicles("anything", &vehicles);
        let ids: Vec<_> = results.iter().map(|r| r.vehicle.id).collect();
        let expected: Vec<_> = vehicles.iter().take(3).map(|v| v.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_best_match_ranks_first() {
        let vehicles = vec![
            sample_vehicle(VehicleType::Truck, "40 ton", "Site C", "diesel"),
            sample_vehicle(VehicleType::Excavator, "35 ton", "Site A", "diesel"),
        ];
        let results = score_vehicles("Excavator for construction at site a", &vehicles);
        assert_eq!(results[0].vehicle.vehicle_type, VehicleType::Excavator);
        assert_eq!(results[0].match_score, 10);
        assert_eq!(results[1].match_score, 5);
    }
}
