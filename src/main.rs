use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use equipment_rental::{
    config::{DatabaseConfig, EnvironmentConfig},
    create_router,
    database::{create_pool, run_migrations},
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚜 Equipment Rental API");
    info!("================================================");
    if config.is_development() {
        warn!("🧪 Modo desarrollo ({})", config.environment);
    }

    // Inicializar base de datos
    let pool = match create_pool(&DatabaseConfig::new(config.database_url.clone())).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(pool, config)?;
    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Perfil:");
    info!("   GET  /api/profile/me - Perfil actual");
    info!("   PUT  /api/profile/me - Actualizar perfil");
    info!("🚜 Vehículos:");
    info!("   GET  /api/vehicles - Listar vehículos (?vehicle_type=&available=)");
    info!("   GET  /api/vehicles/available - Vehículos disponibles");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   POST /api/vehicles - Crear vehículo (dealer)");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo (dealer)");
    info!("📋 Alquileres:");
    info!("   GET  /api/rentals - Listar alquileres");
    info!("   GET  /api/rentals/active - Alquileres activos");
    info!("   POST /api/rentals/checkout - Check-out");
    info!("   POST /api/rentals/:id/checkin - Check-in");
    info!("   PUT  /api/rentals/:id/usage - Métricas de uso (dealer)");
    info!("📷 POST /api/scan - Escanear QR (dealer)");
    info!("⚠️  Anomalías (dealer):");
    info!("   GET  /api/anomalies");
    info!("   GET  /api/anomalies/vehicle/:id");
    info!("   GET  /api/anomalies/summary");
    info!("💡 POST /api/recommendations - Recomendaciones");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
