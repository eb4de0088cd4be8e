use crate::dto::profile_dto::UpdateProfileRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Profile;
use crate::repositories::ProfileRepository;
use crate::utils::errors::{not_found_error, validation_error, AppError};
use sqlx::PgPool;
use validator::Validate;

pub struct ProfileController {
    repository: ProfileRepository,
}

impl ProfileController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProfileRepository::new(pool),
        }
    }

    pub async fn get_me(&self, user: &AuthenticatedUser) -> Result<Profile, AppError> {
        self.repository
            .find_by_id(user.user_id)
            .await?
            .ok_or_else(|| not_found_error("Profile", &user.user_id.to_string()))
    }

    pub async fn update_me(
        &self,
        user: &AuthenticatedUser,
        request: UpdateProfileRequest,
    ) -> Result<ApiResponse<Profile>, AppError> {
        request.validate()?;
        if request.full_name.is_none() && request.phone.is_none() && request.company.is_none() {
            return Err(validation_error("profile", "at least one field is required"));
        }

        let profile = self
            .repository
            .update_contact(user.user_id, request.full_name, request.phone, request.company)
            .await?;

        Ok(ApiResponse::success_with_message(
            profile,
            "Perfil actualizado exitosamente".to_string(),
        ))
    }
}
