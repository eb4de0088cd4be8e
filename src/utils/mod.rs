//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación,
//! JWT y payloads de QR.

pub mod errors;
pub mod jwt;
pub mod qr;
pub mod validation;
