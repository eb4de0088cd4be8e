use serde::Deserialize;
use validator::Validate;

// Request para actualizar el perfil propio. El rol no es editable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub company: Option<String>,
}
