// Library root - exports for testing

pub mod config;
pub mod database;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use config::Config;
pub use handlers::*;

use axum::{routing::get, Router};
use database::DatabasePool;
use services::whatsapp::WaClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabasePool,
    pub config: Arc<Config>,
    pub wa_client: WaClient,
}

/// API routes; main() wraps this with the CORS and trace layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_penjualan))
        .route("/health", get(health_check))
        .route(
            "/api/barang",
            get(handlers::list_barang).post(handlers::save_barang),
        )
        .route(
            "/api/pembelian",
            get(handlers::list_pembelian).post(handlers::save_pembelian),
        )
        .route(
            "/api/penjualan",
            get(handlers::list_penjualan).post(handlers::save_penjualan),
        )
        .route("/api/penjualan/form", get(handlers::sale_form))
        .route("/api/penjualan/:id", get(handlers::get_penjualan))
        .route(
            "/api/pelanggan",
            get(handlers::list_pelanggan).post(handlers::save_pelanggan),
        )
        .route(
            "/api/pengeluaran",
            get(handlers::list_pengeluaran).post(handlers::save_pengeluaran),
        )
        .route(
            "/api/pemodal",
            get(handlers::list_pemodal).post(handlers::save_pemodal),
        )
        .route("/api/laporan", get(handlers::get_laporan))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
