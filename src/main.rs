use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use waserda_api::services::whatsapp::WaClient;
use waserda_api::{database, router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waserda_api=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting Waserda POS API server...");

    let config = Arc::new(Config::from_env()?);
    info!("Configuration loaded");

    let db_pool = database::new_pool(&config.database_url).await?;
    database::init_schema(&db_pool).await?;
    info!("Database ready");

    let wa_client = WaClient::new(config.wa_gateway_url.clone());

    let app_state = AppState {
        db_pool: db_pool.clone(),
        config: config.clone(),
        wa_client,
    };

    let app = router(app_state)
        .layer(tower_http::cors::CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            if let Err(e) = result {
                error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutting down gracefully...");
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
