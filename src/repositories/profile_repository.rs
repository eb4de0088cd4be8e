use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;
use crate::utils::errors::AppError;

pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(profile)
    }

    pub async fn update_contact(
        &self,
        id: Uuid,
        full_name: Option<String>,
        phone: Option<String>,
        company: Option<String>,
    ) -> Result<Profile, AppError> {
        sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                company = COALESCE($4, company),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(phone)
        .bind(company)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }
}
