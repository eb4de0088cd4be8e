//! Middleware de autenticación JWT
//!
//! Este módulo verifica el token del servicio de identidad, carga el perfil
//! del usuario y lo inyecta en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
    Extension,
};
use uuid::Uuid;

use crate::{
    models::UserRole,
    repositories::ProfileRepository,
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn is_dealer(&self) -> bool {
        self.role == UserRole::Dealer
    }

    pub fn require_dealer(&self, operation: &str) -> Result<(), AppError> {
        if self.is_dealer() {
            Ok(())
        } else {
            Err(forbidden_error(operation, "dealer role required"))
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.config.jwt_secret)?;
    let user_id = claims.user_id()?;

    // El perfil lo crea el servicio de identidad al registrarse
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Perfil no encontrado".to_string()))?;

    let authenticated_user = AuthenticatedUser {
        user_id: profile.id,
        role: profile.role,
        email: profile.email.or(claims.email),
    };

    request.extensions_mut().insert(authenticated_user);

    Ok(next.run(request).await)
}

/// Middleware para rutas reservadas a dealers
pub async fn dealer_only_middleware(
    Extension(user): Extension<AuthenticatedUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    user.require_dealer("access dealer endpoint")?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            role,
            email: None,
        }
    }

    #[test]
    fn test_require_dealer() {
        assert!(user(UserRole::Dealer).require_dealer("scan").is_ok());

        let err = user(UserRole::User).require_dealer("scan").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
