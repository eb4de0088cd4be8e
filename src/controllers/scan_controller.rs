use crate::dto::scan_dto::{ScanRequest, ScanResponse};
use crate::repositories::{RentalRepository, VehicleRepository};
use crate::utils::errors::AppError;
use crate::utils::qr::{parse_qr_payload, QrIdentifier};
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

pub struct ScanController {
    vehicles: VehicleRepository,
    rentals: RentalRepository,
}

impl ScanController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            rentals: RentalRepository::new(pool),
        }
    }

    /// Resolver el payload a un vehículo y su alquiler activo
    pub async fn scan(&self, request: ScanRequest) -> Result<ScanResponse, AppError> {
        request.validate()?;

        let vehicle = match parse_qr_payload(&request.payload) {
            Some(QrIdentifier::VehicleId(id)) => match self.vehicles.find_by_id(id).await? {
                Some(vehicle) => Some(vehicle),
                // un id también puede estar guardado como qr_code personalizado
                None => self.vehicles.find_by_qr_code(request.payload.trim()).await?,
            },
            Some(QrIdentifier::Code(code)) => self.vehicles.find_by_qr_code(&code).await?,
            None => None,
        };

        let Some(vehicle) = vehicle else {
            info!("🔎 QR sin vehículo asociado: {}", request.payload.trim());
            return Ok(ScanResponse::not_found());
        };

        let active_rental = self.rentals.find_active_for_vehicle(vehicle.id).await?;

        Ok(ScanResponse {
            found: true,
            vehicle: Some(vehicle),
            active_rental,
        })
    }
}
