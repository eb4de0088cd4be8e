//! DTOs de la API
//!
//! Requests validadas con `validator` y responses serializadas con `serde`.

pub mod common_dto;
pub mod profile_dto;
pub mod recommendation_dto;
pub mod rental_dto;
pub mod scan_dto;
pub mod vehicle_dto;

pub use common_dto::ApiResponse;
