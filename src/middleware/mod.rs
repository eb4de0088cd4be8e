//! Middleware del sistema
//!
//! Este módulo contiene el middleware para autenticación, CORS, rate limiting
//! y otras funcionalidades de seguridad.

pub mod auth;
pub mod cors;
pub mod rate_limit;

pub use auth::*;
pub use cors::*;
pub use rate_limit::*;
