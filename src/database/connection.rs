//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos y las migraciones.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    info!("🔗 Conectando a PostgreSQL: {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("Error conectando a la base de datos")?;

    info!("✅ PostgreSQL conectado exitosamente");
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("📦 Ejecutando migraciones...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Error ejecutando migraciones")?;
    info!("✅ Migraciones completadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
