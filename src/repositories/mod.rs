//! Repositorios
//!
//! Acceso a PostgreSQL con `sqlx::query_as`. Un repositorio por tabla.

pub mod profile_repository;
pub mod rental_repository;
pub mod vehicle_repository;

pub use profile_repository::ProfileRepository;
pub use rental_repository::RentalRepository;
pub use vehicle_repository::VehicleRepository;
