use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Vehicle, VehicleType};
use crate::utils::qr::default_qr_code;
use crate::utils::errors::{conflict_error, internal_error, AppError};

// is_rented se calcula siempre a partir de rentals
const FLEET_SELECT: &str = r#"
    SELECT v.id, v.type, v.name, v.capacity, v.qr_code, v.location, v.fuel_type, v.created_at,
           EXISTS (
               SELECT 1 FROM rentals r
               WHERE r.vehicle_id = v.id AND r.check_in_date IS NULL
           ) AS is_rented
    FROM vehicles v
"#;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_type: VehicleType,
        name: String,
        capacity: String,
        qr_code: Option<String>,
        location: String,
        fuel_type: String,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();
        let qr_code = qr_code.unwrap_or_else(|| default_qr_code(id));

        sqlx::query(
            r#"
            INSERT INTO vehicles (id, type, name, capacity, qr_code, location, fuel_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            "#,
        )
        .bind(id)
        .bind(vehicle_type)
        .bind(name)
        .bind(capacity)
        .bind(&qr_code)
        .bind(location)
        .bind(fuel_type)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_qr_violation(e, &qr_code))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| internal_error("Vehicle not found after insert"))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!("{} WHERE v.id = $1", FLEET_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_qr_code(&self, qr_code: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>(&format!("{} WHERE v.qr_code = $1", FLEET_SELECT))
                .bind(qr_code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    /// Listado con filtros opcionales por tipo y disponibilidad
    pub async fn list(
        &self,
        vehicle_type: Option<VehicleType>,
        available: Option<bool>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            SELECT * FROM ({}) AS fleet
            WHERE ($1::vehicle_type IS NULL OR fleet.type = $1)
              AND ($2::boolean IS NULL OR fleet.is_rented = NOT $2)
            ORDER BY fleet.name
            "#,
            FLEET_SELECT
        ))
        .bind(vehicle_type)
        .bind(available)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn list_available(&self) -> Result<Vec<Vehicle>, AppError> {
        self.list(None, Some(true)).await
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    pub async fn qr_code_exists(&self, qr_code: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE qr_code = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(qr_code)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        vehicle_type: Option<VehicleType>,
        name: Option<String>,
        capacity: Option<String>,
        qr_code: Option<String>,
        location: Option<String>,
        fuel_type: Option<String>,
    ) -> Result<Vehicle, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles
            SET type = COALESCE($2, type),
                name = COALESCE($3, name),
                capacity = COALESCE($4, capacity),
                qr_code = COALESCE($5, qr_code),
                location = COALESCE($6, location),
                fuel_type = COALESCE($7, fuel_type)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(vehicle_type)
        .bind(name)
        .bind(capacity)
        .bind(qr_code.as_deref())
        .bind(location)
        .bind(fuel_type)
        .execute(&self.pool)
        .await
        .map_err(|e| unique_qr_violation(e, qr_code.as_deref().unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }
}

/// Violación del UNIQUE de qr_code entre la comprobación y el INSERT/UPDATE
fn unique_qr_violation(error: sqlx::Error, qr_code: &str) -> AppError {
    match error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            conflict_error("Vehicle", "qr_code", qr_code)
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewRental;
    use crate::repositories::test_support::{seed_profile, seed_vehicle};
    use crate::repositories::RentalRepository;
    use crate::services::checkout_service::RentalStore;
    use chrono::{Duration, Utc};

    #[sqlx::test(migrations = "./migrations")]
    async fn test_is_rented_follows_active_rentals(pool: PgPool) {
        let rented = seed_vehicle(&pool, VehicleType::Bulldozer, "Bulldozer 1").await;
        let idle = seed_vehicle(&pool, VehicleType::Crane, "Crane 1").await;
        let user = seed_profile(&pool).await;
        assert!(!rented.is_rented);

        let now = Utc::now();
        let rentals = RentalRepository::new(pool.clone());
        let rental = rentals
            .insert_if_available(NewRental {
                user_id: user,
                vehicle_id: rented.id,
                check_out_date: now,
                expected_return_date: now + Duration::days(3),
            })
            .await
            .unwrap()
            .unwrap();

        let repo = VehicleRepository::new(pool.clone());
        assert!(repo.find_by_id(rented.id).await.unwrap().unwrap().is_rented);

        let available = repo.list(None, Some(true)).await.unwrap();
        assert_eq!(available.iter().map(|v| v.id).collect::<Vec<_>>(), vec![idle.id]);

        let out = repo.list(None, Some(false)).await.unwrap();
        assert_eq!(out.iter().map(|v| v.id).collect::<Vec<_>>(), vec![rented.id]);

        assert_eq!(repo.list(Some(VehicleType::Crane), None).await.unwrap().len(), 1);

        rentals.mark_checked_in(rental.id, Utc::now()).await.unwrap();
        assert_eq!(repo.list_available().await.unwrap().len(), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_qr_code_is_conflict(pool: PgPool) {
        let repo = VehicleRepository::new(pool.clone());
        let create = |qr: &str| {
            repo.create(
                VehicleType::Truck,
                "Truck".to_string(),
                "10 ton".to_string(),
                Some(qr.to_string()),
                "Depot".to_string(),
                "diesel".to_string(),
            )
        };

        let vehicle = create("TRK-1").await.unwrap();
        assert_eq!(vehicle.qr_code, "TRK-1");
        assert!(matches!(create("TRK-1").await, Err(AppError::Conflict(_))));
    }
}
