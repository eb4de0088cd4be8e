//! Utilidades de validación
//!
//! Funciones custom para `validator` y parsing de valores libres.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    static ref LEADING_NUMBER: Regex = Regex::new(r"^\s*(\d+)").expect("valid regex");
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Extraer el entero inicial de un texto libre ("35 ton" -> 35)
pub fn parse_leading_number(value: &str) -> Option<u32> {
    LEADING_NUMBER
        .captures(value)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
