//! Payload de códigos QR
//!
//! Un vehículo se identifica por su id embebido en el QR. Los códigos antiguos
//! llevan el prefijo `vehicle:`, los nuevos solo el id.

use uuid::Uuid;

const LEGACY_PREFIX: &str = "vehicle:";

/// Identificador extraído de un QR escaneado o tecleado
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrIdentifier {
    /// El payload es el id de la fila
    VehicleId(Uuid),
    /// Cualquier otro texto; se busca contra la columna qr_code
    Code(String),
}

/// Normalizar el texto escaneado. Devuelve None si queda vacío.
pub fn parse_qr_payload(payload: &str) -> Option<QrIdentifier> {
    let trimmed = payload.trim();
    let body = match trimmed.get(..LEGACY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(LEGACY_PREFIX) => trimmed[LEGACY_PREFIX.len()..].trim(),
        _ => trimmed,
    };

    if body.is_empty() {
        return None;
    }

    match Uuid::parse_str(body) {
        Ok(id) => Some(QrIdentifier::VehicleId(id)),
        Err(_) => Some(QrIdentifier::Code(body.to_string())),
    }
}

/// Código QR por defecto para un vehículo nuevo
pub fn default_qr_code(vehicle_id: Uuid) -> String {
    vehicle_id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_qr_payload(&id.to_string()), Some(QrIdentifier::VehicleId(id)));
    }

    #[test]
    fn test_legacy_prefix() {
        let id = Uuid::new_v4();
        assert_eq!(
            parse_qr_payload(&format!("  vehicle:{}\n", id)),
            Some(QrIdentifier::VehicleId(id))
        );
        assert_eq!(
            parse_qr_payload(&format!("VEHICLE: {}", id)),
            Some(QrIdentifier::VehicleId(id))
        );
    }

    #[test]
    fn test_free_text_code() {
        assert_eq!(
            parse_qr_payload("EXC-0001"),
            Some(QrIdentifier::Code("EXC-0001".to_string()))
        );
    }

    #[test]
    fn test_legacy_prefix_on_free_text_code() {
        assert_eq!(
            parse_qr_payload("vehicle:EXC-0001"),
            Some(QrIdentifier::Code("EXC-0001".to_string()))
        );
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(parse_qr_payload("   "), None);
        assert_eq!(parse_qr_payload("vehicle:"), None);
    }

    #[test]
    fn test_multibyte_payload_does_not_panic() {
        assert_eq!(
            parse_qr_payload("ñandú"),
            Some(QrIdentifier::Code("ñandú".to_string()))
        );
    }
}
