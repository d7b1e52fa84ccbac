use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ids::{next_id, Entity};
use crate::models::Pengeluaran;
use crate::utils::date;
use crate::AppState;

const KATEGORI_LIST: &[&str] = &["Listrik", "Sewa", "Bensin", "ATK", "Gaji", "Lainnya"];

#[derive(Deserialize)]
pub struct PengeluaranListQuery {
    pub edit: Option<String>,
}

#[derive(Serialize)]
pub struct PengeluaranListResponse {
    pub rows: Vec<Pengeluaran>,
    pub item_edit: Option<Pengeluaran>,
    pub kategori_list: Vec<&'static str>,
    pub today: NaiveDate,
}

#[derive(Deserialize)]
pub struct SavePengeluaranRequest {
    #[serde(default)]
    pub id_pengeluaran: String,
    pub tanggal: String,
    pub kategori: String,
    pub jumlah: i64,
    #[serde(default)]
    pub keterangan: String,
    #[serde(default)]
    pub mode: String,
}

#[derive(Serialize)]
pub struct SavePengeluaranResponse {
    pub id_pengeluaran: String,
    pub message: String,
}

pub async fn list_pengeluaran(
    State(state): State<AppState>,
    Query(query): Query<PengeluaranListQuery>,
) -> Result<Json<PengeluaranListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let rows = sqlx::query_as::<_, Pengeluaran>("SELECT * FROM pengeluaran")
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching pengeluaran: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

    let item_edit = match query.edit.as_deref() {
        Some(id) => sqlx::query_as::<_, Pengeluaran>(
            "SELECT * FROM pengeluaran WHERE id_pengeluaran = ?",
        )
        .bind(id)
        .fetch_optional(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching pengeluaran for edit: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?,
        None => None,
    };

    Ok(Json(PengeluaranListResponse {
        rows,
        item_edit,
        kategori_list: KATEGORI_LIST.to_vec(),
        today: Local::now().date_naive(),
    }))
}

pub async fn save_pengeluaran(
    State(state): State<AppState>,
    Json(payload): Json<SavePengeluaranRequest>,
) -> Result<(StatusCode, Json<SavePengeluaranResponse>), (StatusCode, Json<serde_json::Value>)> {
    let tanggal = date::parse_date(&payload.tanggal).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": format!("Invalid date format: {}", e)})),
        )
    })?;

    if payload.mode == "edit" {
        let result = sqlx::query(
            r#"
            UPDATE pengeluaran SET tanggal = ?, kategori = ?, jumlah = ?, keterangan = ?
            WHERE id_pengeluaran = ?
            "#,
        )
        .bind(tanggal)
        .bind(&payload.kategori)
        .bind(payload.jumlah)
        .bind(&payload.keterangan)
        .bind(&payload.id_pengeluaran)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error updating pengeluaran: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;
        if result.rows_affected() == 0 {
            return Err((
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Pengeluaran tidak ditemukan"})),
            ));
        }

        Ok((
            StatusCode::OK,
            Json(SavePengeluaranResponse {
                id_pengeluaran: payload.id_pengeluaran,
                message: "Pengeluaran diperbarui".to_string(),
            }),
        ))
    } else {
        let new_id = next_id(&state.db_pool, Entity::Pengeluaran)
            .await
            .map_err(|e| {
                tracing::error!("Error generating pengeluaran id: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        sqlx::query(
            r#"
            INSERT INTO pengeluaran (id_pengeluaran, tanggal, kategori, jumlah, keterangan)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_id)
        .bind(tanggal)
        .bind(&payload.kategori)
        .bind(payload.jumlah)
        .bind(&payload.keterangan)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error creating pengeluaran: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        Ok((
            StatusCode::CREATED,
            Json(SavePengeluaranResponse {
                id_pengeluaran: new_id,
                message: "Pengeluaran dicatat".to_string(),
            }),
        ))
    }
}
