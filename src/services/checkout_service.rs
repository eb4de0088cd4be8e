//! Check-out / check-in de vehículos
//!
//! Disponible -> Alquilado crea un alquiler con `check_in_date` nulo.
//! Alquilado -> Disponible fija `check_in_date = now`. El estado del vehículo
//! se deriva siempre de la existencia del alquiler activo.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Months, Utc};
use tracing::info;
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::{NewRental, Rental};
use crate::utils::errors::{bad_request_error, forbidden_error, not_found_error, AppError, AppResult};

pub const DEFAULT_RENTAL_DAYS: i64 = 7;

/// Persistencia que necesita el flujo de alquiler
#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn vehicle_exists(&self, vehicle_id: Uuid) -> AppResult<bool>;

    /// Inserta el alquiler solo si el vehículo no tiene uno activo.
    /// La comprobación y la inserción deben ser atómicas. None si ya estaba alquilado.
    async fn insert_if_available(&self, rental: NewRental) -> AppResult<Option<Rental>>;

    async fn find_rental(&self, id: Uuid) -> AppResult<Option<Rental>>;

    /// Cierra el alquiler si sigue activo. None si ya estaba cerrado.
    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<Option<Rental>>;
}

/// Duración solicitada para un alquiler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalDuration {
    Days(i64),
    Months(u32),
}

impl Default for RentalDuration {
    fn default() -> Self {
        RentalDuration::Days(DEFAULT_RENTAL_DAYS)
    }
}

/// Fecha de devolución prevista
pub fn expected_return_date(
    check_out: DateTime<Utc>,
    duration: RentalDuration,
) -> AppResult<DateTime<Utc>> {
    match duration {
        RentalDuration::Days(days) => Ok(check_out + Duration::days(days)),
        RentalDuration::Months(months) => check_out
            .checked_add_months(Months::new(months))
            .ok_or_else(|| bad_request_error("Rental duration out of range")),
    }
}

/// Solicitud de check-out ya validada
#[derive(Debug, Clone)]
pub struct CheckoutCommand {
    pub vehicle_id: Uuid,
    pub renter_id: Option<Uuid>,
    pub duration: RentalDuration,
}

pub struct CheckoutService<S: RentalStore> {
    store: S,
}

impl<S: RentalStore> CheckoutService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn check_out(
        &self,
        requester: &AuthenticatedUser,
        command: CheckoutCommand,
    ) -> AppResult<Rental> {
        let renter_id = command.renter_id.unwrap_or(requester.user_id);

        if renter_id != requester.user_id && !requester.is_dealer() {
            return Err(forbidden_error(
                "assign rental",
                "only dealers can rent on behalf of another user",
            ));
        }
        if matches!(command.duration, RentalDuration::Months(_)) && !requester.is_dealer() {
            return Err(forbidden_error(
                "set monthly duration",
                "only dealers can set rental months",
            ));
        }

        if !self.store.vehicle_exists(command.vehicle_id).await? {
            return Err(not_found_error("Vehicle", &command.vehicle_id.to_string()));
        }

        let now = Utc::now();
        let rental = NewRental {
            user_id: renter_id,
            vehicle_id: command.vehicle_id,
            check_out_date: now,
            expected_return_date: expected_return_date(now, command.duration)?,
        };

        let rental = self
            .store
            .insert_if_available(rental)
            .await?
            .ok_or_else(|| AppError::Conflict("Vehicle already has an active rental".to_string()))?;

        info!(
            "🚜 Vehículo {} alquilado a {} hasta {}",
            rental.vehicle_id, rental.user_id, rental.expected_return_date
        );
        Ok(rental)
    }

    pub async fn check_in(&self, requester: &AuthenticatedUser, rental_id: Uuid) -> AppResult<Rental> {
        let rental = self
            .store
            .find_rental(rental_id)
            .await?
            .ok_or_else(|| not_found_error("Rental", &rental_id.to_string()))?;

        if rental.user_id != requester.user_id && !requester.is_dealer() {
            return Err(forbidden_error("check in rental", "rental belongs to another user"));
        }
        if !rental.is_active() {
            return Err(AppError::Conflict("Rental is already checked in".to_string()));
        }

        let rental = self
            .store
            .mark_checked_in(rental_id, Utc::now())
            .await?
            .ok_or_else(|| AppError::Conflict("Rental is already checked in".to_string()))?;

        info!("✅ Vehículo {} devuelto (alquiler {})", rental.vehicle_id, rental.id);
        Ok(rental)
    }
}
