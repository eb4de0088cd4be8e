//! Utilidades JWT
//!
//! Los tokens los emite el servicio de identidad hospedado; aquí solo se
//! verifican con el secreto compartido (HS256).

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Claims del token del servicio de identidad
#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,  // user_id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: usize,   // expiration timestamp
    #[serde(default)]
    pub iat: usize,   // issued at timestamp
}

impl IdentityClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))
    }
}

/// Generar un token firmado con el mismo secreto.
/// En producción lo emite el servicio de identidad; se usa en desarrollo y tests.
pub fn generate_token(
    user_id: Uuid,
    email: Option<String>,
    secret: &str,
    expires_in_secs: i64,
) -> Result<String, AppError> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(expires_in_secs);

    let claims = IdentityClaims {
        sub: user_id.to_string(),
        email,
        aud: Some("authenticated".to_string()),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar un token
pub fn verify_token(token: &str, secret: &str) -> Result<IdentityClaims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    // La audiencia la fija el servicio de identidad
    validation.validate_aud = false;

    let token_data = decode::<IdentityClaims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AppError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}
