use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ActiveRentalSnapshot, NewRental, Rental, UsageMetrics};
use crate::services::checkout_service::RentalStore;
use crate::utils::errors::{AppError, AppResult};

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE user_id = $1 ORDER BY check_out_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    pub async fn list_all(&self) -> Result<Vec<Rental>, AppError> {
        let rentals =
            sqlx::query_as::<_, Rental>("SELECT * FROM rentals ORDER BY check_out_date DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rentals)
    }

    /// Alquileres activos; `user_id` restringe a los de un usuario
    pub async fn list_active(&self, user_id: Option<Uuid>) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE check_in_date IS NULL
              AND ($1::uuid IS NULL OR user_id = $1)
            ORDER BY check_out_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    pub async fn find_active_for_vehicle(&self, vehicle_id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE vehicle_id = $1 AND check_in_date IS NULL",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    /// Alquileres activos unidos a su vehículo, entrada del motor de anomalías
    pub async fn active_snapshots(
        &self,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<ActiveRentalSnapshot>, AppError> {
        let snapshots = sqlx::query_as::<_, ActiveRentalSnapshot>(
            r#"
            SELECT r.id AS rental_id,
                   v.id AS vehicle_id,
                   v.name AS vehicle_name,
                   v.type AS vehicle_type,
                   r.check_out_date,
                   r.expected_return_date,
                   r.idle_time,
                   r.working_time,
                   r.fuel_usage,
                   r.downtime
            FROM rentals r
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.check_in_date IS NULL
              AND ($1::uuid IS NULL OR v.id = $1)
            "#,
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(snapshots)
    }

    pub async fn update_usage(&self, id: Uuid, usage: &UsageMetrics) -> Result<Rental, AppError> {
        sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET idle_time = COALESCE($2, idle_time),
                working_time = COALESCE($3, working_time),
                fuel_usage = COALESCE($4, fuel_usage),
                downtime = COALESCE($5, downtime),
                no_operating_days = COALESCE($6, no_operating_days)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(usage.idle_time)
        .bind(usage.working_time)
        .bind(usage.fuel_usage)
        .bind(usage.downtime)
        .bind(usage.no_operating_days)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Rental not found".to_string()))
    }
}

#[async_trait]
impl RentalStore for RentalRepository {
    async fn vehicle_exists(&self, vehicle_id: Uuid) -> AppResult<bool> {
        let result: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(vehicle_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0)
    }

    async fn insert_if_available(&self, rental: NewRental) -> AppResult<Option<Rental>> {
        let mut tx = self.pool.begin().await?;

        // Bloquear la fila del vehículo serializa los check-out concurrentes
        let locked: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(rental.vehicle_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        let (rented,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE vehicle_id = $1 AND check_in_date IS NULL)",
        )
        .bind(rental.vehicle_id)
        .fetch_one(&mut *tx)
        .await?;
        if rented {
            return Ok(None);
        }

        let inserted = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (id, user_id, vehicle_id, check_out_date, expected_return_date, created_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rental.user_id)
        .bind(rental.vehicle_id)
        .bind(rental.check_out_date)
        .bind(rental.expected_return_date)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(row) => {
                tx.commit().await?;
                Ok(Some(row))
            }
            // índice parcial rentals_one_active_per_vehicle
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_rental(&self, id: Uuid) -> AppResult<Option<Rental>> {
        self.find_by_id(id).await
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET check_in_date = $2
            WHERE id = $1 AND check_in_date IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }
}
