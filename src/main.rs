use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

use car_rental_backend::{
    config::EnvironmentConfig, create_router, database::seed, AppState, Store,
};

/// Cada cuánto se purgan las sesiones expiradas
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(15 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Car Rental Backend");
    info!("================================================");
    info!(
        "⚙️ Entorno: {} | impuesto {}% | solape {} | ignorar canceladas: {}",
        config.environment,
        config.tax_rate_percent,
        config.boundary_policy,
        config.ignore_cancelled
    );

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(config, Arc::new(Store::new()));

    // Datos iniciales
    if let Err(e) = seed::seed(&state).await {
        error!("❌ Error creando datos iniciales: {}", e);
        return Err(anyhow::anyhow!("Error de seed: {}", e));
    }

    // Limpieza periódica de sesiones
    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let removed = cleanup_state.cleanup_expired_sessions().await;
            if removed > 0 {
                info!("🧹 {} sesiones expiradas eliminadas", removed);
            }
        }
    });

    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔑 Auth:");
    info!("   POST /api/auth/register - Registro");
    info!("   POST /api/auth/login - Login (cookie de sesión)");
    info!("   POST /api/auth/logout - Logout");
    info!("   GET  /api/auth/me - Usuario actual");
    info!("🚗 Flota:");
    info!("   GET  /api/cars - Listar vehículos (filtros)");
    info!("   GET  /api/cars/:id - Obtener vehículo");
    info!("   POST /api/cars - Crear vehículo (admin)");
    info!("   PUT  /api/cars/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/cars/:id - Eliminar vehículo (admin)");
    info!("   POST /api/cars/check-availability - Comprobar disponibilidad");
    info!("   GET  /api/cars/:id/booked-dates - Fechas ocupadas");
    info!("   GET  /api/cars/:id/reviews - Reviews del vehículo");
    info!("📅 Reservas:");
    info!("   GET  /api/extras - Catálogo de extras");
    info!("   POST /api/bookings/quote - Presupuesto");
    info!("   POST /api/bookings - Crear reserva");
    info!("   GET  /api/bookings - Listar reservas (admin)");
    info!("   GET  /api/bookings/me - Mis reservas");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("   PUT  /api/bookings/:id - Actualizar reserva (admin)");
    info!("   POST /api/bookings/:id/pay - Pagar reserva");
    info!("   POST /api/bookings/:id/cancel - Cancelar reserva");
    info!("   DELETE /api/bookings/:id - Eliminar reserva (admin)");
    info!("⭐ Reviews:");
    info!("   POST /api/reviews - Crear review");
    info!("👥 Administración:");
    info!("   GET/PUT/DELETE /api/users[/:id] - Usuarios (admin)");
    info!("   GET  /api/admin/stats - Dashboard (admin)");

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
