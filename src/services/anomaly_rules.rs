//! Reglas de detección de anomalías
//!
//! Motor puro sin efectos: recibe los alquileres activos ya unidos a su
//! vehículo y devuelve las anomalías detectadas. Cada alquiler puede emitir
//! de 0 a 5 anomalías, las cinco reglas son independientes.

use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::models::{
    ActiveRentalSnapshot, Anomaly, AnomalyKind, AnomalySummary, Severity, Thresholds, VehicleType,
};

/// Horas de inactividad a partir de las cuales se marca la anomalía
const DOWNTIME_LIMIT_HOURS: f64 = 3.0;
const DOWNTIME_HIGH_HOURS: f64 = 6.0;
const IDLE_HIGH_FACTOR: f64 = 1.2;
const FUEL_HIGH_FACTOR: f64 = 1.3;

/// Tolerancia de comparación: los umbrales se definen en decimal (0.70 * 1.2 = 0.84)
const EPSILON: f64 = 1e-9;

/// Umbrales por tipo de vehículo. Los tipos sin umbral no se evalúan.
pub fn thresholds_for(vehicle_type: VehicleType) -> Option<Thresholds> {
    let (fuel_per_hour, idle_ratio) = match vehicle_type {
        VehicleType::Excavator => (25.0, 0.70),
        VehicleType::Bulldozer => (30.0, 0.60),
        VehicleType::Crane => (20.0, 0.65),
        VehicleType::Truck => (35.0, 0.50),
        VehicleType::Forklift => (8.0, 0.80),
        VehicleType::Loader => return None,
    };
    Some(Thresholds {
        fuel_per_hour,
        idle_ratio,
    })
}

/// idle / (idle + working), 0 si no hay horas registradas
pub fn idle_ratio(idle_time: f64, working_time: f64) -> f64 {
    let total = idle_time + working_time;
    if total == 0.0 {
        0.0
    } else {
        idle_time / total
    }
}

/// Consumo por hora trabajada, 0 si no hay horas trabajadas
pub fn fuel_per_hour(fuel_usage: f64, working_time: f64) -> f64 {
    if working_time == 0.0 {
        0.0
    } else {
        fuel_usage / working_time
    }
}

fn exceeds(value: f64, limit: f64) -> bool {
    value - limit > EPSILON
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Evaluar las cinco reglas sobre un alquiler activo
pub fn evaluate_rental(
    rental: &ActiveRentalSnapshot,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> Vec<Anomaly> {
    let mut found = Vec::new();
    let mut push = |kind: AnomalyKind, severity: Severity, score: f64, details: String| {
        found.push(Anomaly {
            rental_id: rental.rental_id,
            vehicle_id: rental.vehicle_id,
            vehicle_name: rental.vehicle_name.clone(),
            vehicle_type: rental.vehicle_type,
            anomaly_type: kind,
            severity,
            score: round2(score),
            details,
            detected_at: now,
        });
    };

    if rental.expected_return_date < now {
        let days = (now - rental.expected_return_date).num_days();
        push(
            AnomalyKind::Overdue,
            Severity::High,
            (days * 10) as f64,
            format!("Overdue by {} days", days),
        );
    }

    let ratio = idle_ratio(rental.idle_time, rental.working_time);
    if exceeds(ratio, thresholds.idle_ratio) {
        let severity = if exceeds(ratio, thresholds.idle_ratio * IDLE_HIGH_FACTOR) {
            Severity::High
        } else {
            Severity::Medium
        };
        push(
            AnomalyKind::HighIdleRatio,
            severity,
            (ratio - thresholds.idle_ratio) * 100.0,
            format!(
                "Idle ratio {:.1}% exceeds threshold {:.1}%",
                ratio * 100.0,
                thresholds.idle_ratio * 100.0
            ),
        );
    }

    if rental.working_time == 0.0 && rental.check_out_date < now - Duration::days(1) {
        let days = (now - rental.check_out_date).num_days();
        push(
            AnomalyKind::NoWorkWhileRented,
            Severity::Medium,
            (days * 5) as f64,
            format!("No working time recorded in {} days since checkout", days),
        );
    }

    let fph = fuel_per_hour(rental.fuel_usage, rental.working_time);
    if exceeds(fph, thresholds.fuel_per_hour) {
        let severity = if exceeds(fph, thresholds.fuel_per_hour * FUEL_HIGH_FACTOR) {
            Severity::High
        } else {
            Severity::Medium
        };
        push(
            AnomalyKind::ExcessFuelPerHour,
            severity,
            (fph - thresholds.fuel_per_hour) * 2.0,
            format!(
                "Fuel usage {:.2}/h exceeds threshold {:.2}/h",
                fph, thresholds.fuel_per_hour
            ),
        );
    }

    if exceeds(rental.downtime, DOWNTIME_LIMIT_HOURS) {
        let severity = if exceeds(rental.downtime, DOWNTIME_HIGH_HOURS) {
            Severity::High
        } else {
            Severity::Medium
        };
        push(
            AnomalyKind::LongDowntime,
            severity,
            (rental.downtime - DOWNTIME_LIMIT_HOURS) * 3.0,
            format!("Downtime of {:.1} hours", rental.downtime),
        );
    }

    found
}

/// Detectar anomalías en todos los alquileres activos.
/// Orden: score desc, luego detected_at desc.
pub fn detect_anomalies(rentals: &[ActiveRentalSnapshot], now: DateTime<Utc>) -> Vec<Anomaly> {
    let mut anomalies: Vec<Anomaly> = rentals
        .iter()
        .filter_map(|rental| thresholds_for(rental.vehicle_type).map(|t| (rental, t)))
        .flat_map(|(rental, thresholds)| evaluate_rental(rental, &thresholds, now))
        .collect();

    anomalies.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.detected_at.cmp(&a.detected_at))
    });
    anomalies
}

/// Agrupar anomalías por vehículo, ordenado por score total desc
pub fn summarize(anomalies: &[Anomaly]) -> Vec<AnomalySummary> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut groups: HashMap<Uuid, (AnomalySummary, BTreeSet<AnomalyKind>)> = HashMap::new();

    for anomaly in anomalies {
        let (summary, kinds) = groups.entry(anomaly.vehicle_id).or_insert_with(|| {
            order.push(anomaly.vehicle_id);
            (
                AnomalySummary {
                    vehicle_id: anomaly.vehicle_id,
                    vehicle_name: anomaly.vehicle_name.clone(),
                    vehicle_type: anomaly.vehicle_type,
                    total_anomalies: 0,
                    high_severity_count: 0,
                    medium_severity_count: 0,
                    low_severity_count: 0,
                    total_score: 0.0,
                    avg_score: 0.0,
                    anomaly_types: Vec::new(),
                },
                BTreeSet::new(),
            )
        });

        summary.total_anomalies += 1;
        match anomaly.severity {
            Severity::High => summary.high_severity_count += 1,
            Severity::Medium => summary.medium_severity_count += 1,
            Severity::Low => summary.low_severity_count += 1,
        }
        summary.total_score += anomaly.score;
        kinds.insert(anomaly.anomaly_type);
    }

    let mut summaries: Vec<AnomalySummary> = order
        .into_iter()
        .filter_map(|vehicle_id| groups.remove(&vehicle_id))
        .map(|(mut summary, kinds)| {
            summary.total_score = round2(summary.total_score);
            summary.avg_score = round2(summary.total_score / summary.total_anomalies as f64);
            summary.anomaly_types = kinds.into_iter().collect();
            summary
        })
        .collect();

    summaries.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(vehicle_type: VehicleType, now: DateTime<Utc>) -> ActiveRentalSnapshot {
        ActiveRentalSnapshot {
            rental_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            vehicle_name: "EX-01".to_string(),
            vehicle_type,
            check_out_date: now - Duration::hours(2),
            expected_return_date: now + Duration::days(5),
            idle_time: 0.0,
            working_time: 0.0,
            fuel_usage: 0.0,
            downtime: 0.0,
        }
    }

    fn excavator() -> Thresholds {
        thresholds_for(VehicleType::Excavator).unwrap()
    }

    fn kinds(anomalies: &[Anomaly]) -> Vec<AnomalyKind> {
        anomalies.iter().map(|a| a.anomaly_type).collect()
    }

    #[test]
    fn test_threshold_table() {
        let expected = [
            (VehicleType::Excavator, 25.0, 0.70),
            (VehicleType::Bulldozer, 30.0, 0.60),
            (VehicleType::Crane, 20.0, 0.65),
            (VehicleType::Truck, 35.0, 0.50),
            (VehicleType::Forklift, 8.0, 0.80),
        ];
        for (vehicle_type, fuel, idle) in expected {
            let t = thresholds_for(vehicle_type).unwrap();
            assert_eq!(t.fuel_per_hour, fuel);
            assert_eq!(t.idle_ratio, idle);
        }
        assert!(thresholds_for(VehicleType::Loader).is_none());
    }

    #[test]
    fn test_zero_hours_no_division_by_zero() {
        assert_eq!(idle_ratio(0.0, 0.0), 0.0);
        assert_eq!(fuel_per_hour(0.0, 0.0), 0.0);
        assert_eq!(fuel_per_hour(50.0, 0.0), 0.0);

        let now = Utc::now();
        let rental = snapshot(VehicleType::Excavator, now);
        assert!(evaluate_rental(&rental, &excavator(), now).is_empty());
    }

    #[test]
    fn test_idle_ratio_medium_below_high_factor() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Excavator, now);
        rental.idle_time = 80.0;
        rental.working_time = 20.0;

        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::HighIdleRatio]);
        assert_eq!(anomalies[0].severity, Severity::Medium);
        assert!((anomalies[0].score - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_idle_ratio_boundary_exactly_at_high_factor_is_medium() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Excavator, now);
        rental.idle_time = 84.0;
        rental.working_time = 16.0;

        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].severity, Severity::Medium);
        assert!((anomalies[0].score - 14.0).abs() < 1e-9);

        rental.idle_time = 85.0;
        rental.working_time = 15.0;
        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(anomalies[0].severity, Severity::High);
    }

    #[test]
    fn test_idle_ratio_at_threshold_not_flagged() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Excavator, now);
        rental.idle_time = 70.0;
        rental.working_time = 30.0;
        assert!(evaluate_rental(&rental, &excavator(), now).is_empty());
    }

    #[test]
    fn test_overdue_three_days_scores_thirty() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Excavator, now);
        rental.check_out_date = now - Duration::hours(12);
        rental.expected_return_date = now - Duration::days(3);

        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::Overdue]);
        assert_eq!(anomalies[0].severity, Severity::High);
        assert_eq!(anomalies[0].score, 30.0);
    }

    #[test]
    fn test_no_work_after_more_than_one_day() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Crane, now);
        rental.check_out_date = now - Duration::days(4);
        let t = thresholds_for(VehicleType::Crane).unwrap();

        let anomalies = evaluate_rental(&rental, &t, now);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::NoWorkWhileRented]);
        assert_eq!(anomalies[0].severity, Severity::Medium);
        assert_eq!(anomalies[0].score, 20.0);

        rental.check_out_date = now - Duration::hours(23);
        assert!(evaluate_rental(&rental, &t, now).is_empty());
    }

    #[test]
    fn test_excess_fuel_severity() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Excavator, now);
        rental.working_time = 10.0;
        rental.fuel_usage = 300.0; // 30/h

        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(kinds(&anomalies), vec![AnomalyKind::ExcessFuelPerHour]);
        assert_eq!(anomalies[0].severity, Severity::Medium);
        assert_eq!(anomalies[0].score, 10.0);

        rental.fuel_usage = 330.0; // 33/h > 32.5
        let anomalies = evaluate_rental(&rental, &excavator(), now);
        assert_eq!(anomalies[0].severity, Severity::High);
        assert_eq!(anomalies[0].score, 16.0);
    }

    #[test]
    fn test_long_downtime_severity() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Truck, now);
        let t = thresholds_for(VehicleType::Truck).unwrap();

        rental.downtime = 3.0;
        assert!(evaluate_rental(&rental, &t, now).is_empty());

        rental.downtime = 5.0;
        let anomalies = evaluate_rental(&rental, &t, now);
        assert_eq!(anomalies[0].severity, Severity::Medium);
        assert_eq!(anomalies[0].score, 6.0);

        rental.downtime = 8.0;
        let anomalies = evaluate_rental(&rental, &t, now);
        assert_eq!(anomalies[0].severity, Severity::High);
        assert_eq!(anomalies[0].score, 15.0);
    }

    #[test]
    fn test_rules_are_not_exclusive() {
        let now = Utc::now();
        let mut rental = snapshot(VehicleType::Bulldozer, now);
        rental.check_out_date = now - Duration::days(10);
        rental.expected_return_date = now - Duration::days(2);
        rental.idle_time = 40.0;
        rental.working_time = 0.0;
        rental.downtime = 7.0;
        let t = thresholds_for(VehicleType::Bulldozer).unwrap();

        let anomalies = evaluate_rental(&rental, &t, now);
        assert_eq!(
            kinds(&anomalies),
            vec![
                AnomalyKind::Overdue,
                AnomalyKind::HighIdleRatio,
                AnomalyKind::NoWorkWhileRented,
                AnomalyKind::LongDowntime,
            ]
        );
    }

    #[test]
    fn test_detect_skips_types_without_thresholds_and_sorts() {
        let now = Utc::now();
        let mut loader = snapshot(VehicleType::Loader, now);
        loader.expected_return_date = now - Duration::days(30);

        let mut late = snapshot(VehicleType::Excavator, now);
        late.expected_return_date = now - Duration::days(5);

        let mut idle = snapshot(VehicleType::Truck, now);
        idle.idle_time = 9.0;
        idle.working_time = 1.0;

        let anomalies = detect_anomalies(&[loader, idle, late], now);
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].anomaly_type, AnomalyKind::Overdue);
        assert_eq!(anomalies[0].score, 50.0);
        assert_eq!(anomalies[1].anomaly_type, AnomalyKind::HighIdleRatio);
        assert!(anomalies.iter().all(|a| a.vehicle_type != VehicleType::Loader));
    }

    #[test]
    fn test_detect_empty_is_not_an_error() {
        assert!(detect_anomalies(&[], Utc::now()).is_empty());
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_summarize_groups_by_vehicle() {
        let now = Utc::now();
        let mut a = snapshot(VehicleType::Excavator, now);
        a.expected_return_date = now - Duration::days(1);
        a.downtime = 4.0;

        let mut b = snapshot(VehicleType::Truck, now);
        b.expected_return_date = now - Duration::days(4);
        b.downtime = 7.0;

        let anomalies = detect_anomalies(&[a.clone(), b.clone()], now);
        let summary = summarize(&anomalies);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].vehicle_id, b.vehicle_id);
        assert_eq!(summary[0].total_anomalies, 2);
        assert_eq!(summary[0].high_severity_count, 2);
        assert_eq!(summary[0].total_score, 52.0);
        assert_eq!(summary[0].avg_score, 26.0);
        assert_eq!(
            summary[0].anomaly_types,
            vec![AnomalyKind::Overdue, AnomalyKind::LongDowntime]
        );

        assert_eq!(summary[1].vehicle_id, a.vehicle_id);
        assert_eq!(summary[1].high_severity_count, 1);
        assert_eq!(summary[1].medium_severity_count, 1);
        assert_eq!(summary[1].low_severity_count, 0);
        assert_eq!(summary[1].total_score, 13.0);
    }
}
