use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Datelike, Local};
use serde::Deserialize;

use crate::services::report::{self, Laporan};
use crate::AppState;

#[derive(Deserialize)]
pub struct LaporanQuery {
    pub bulan: Option<u32>,
    pub tahun: Option<i32>,
}

pub async fn get_laporan(
    State(state): State<AppState>,
    Query(query): Query<LaporanQuery>,
) -> Result<Json<Laporan>, (StatusCode, Json<serde_json::Value>)> {
    let today = Local::now().date_naive();
    let month = query.bulan.unwrap_or_else(|| today.month());
    let year = query.tahun.unwrap_or_else(|| today.year());

    if !(1..=12).contains(&month) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Bulan tidak valid"})),
        ));
    }

    let laporan = report::monthly_report(
        &state.db_pool,
        month,
        year,
        &state.config.cash_item_token,
    )
    .await
    .map_err(|e| {
        tracing::error!("Error building laporan: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Database error"})),
        )
    })?;

    Ok(Json(laporan))
}
