use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::ids::{next_id, Entity};
use crate::models::Pemodal;
use crate::utils::date;
use crate::AppState;

#[derive(Deserialize)]
pub struct PemodalListQuery {
    pub edit: Option<String>,
}

/// Contributions shown are scoped to the current month, like the report.
#[derive(Serialize)]
pub struct PemodalListResponse {
    pub rows: Vec<Pemodal>,
    pub item_edit: Option<Pemodal>,
    pub today: NaiveDate,
}

#[derive(Deserialize)]
pub struct SavePemodalRequest {
    #[serde(default)]
    pub id_pemodal: String,
    pub nama: String,
    pub jumlah: i64,
    pub tanggal: String,
    #[serde(default)]
    pub mode: String,
}

#[derive(Serialize)]
pub struct SavePemodalResponse {
    pub id_pemodal: String,
    pub message: String,
}

pub async fn list_pemodal(
    State(state): State<AppState>,
    Query(query): Query<PemodalListQuery>,
) -> Result<Json<PemodalListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let (bulan, tahun) = date::month_key(Local::now().date_naive());

    let rows = sqlx::query_as::<_, Pemodal>(
        r#"
        SELECT * FROM pemodal
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_all(&*state.db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Error fetching pemodal: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Database error"})),
        )
    })?;

    let item_edit = match query.edit.as_deref() {
        Some(id) => sqlx::query_as::<_, Pemodal>("SELECT * FROM pemodal WHERE id_pemodal = ?")
            .bind(id)
            .fetch_optional(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching pemodal for edit: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?,
        None => None,
    };

    Ok(Json(PemodalListResponse {
        rows,
        item_edit,
        today: Local::now().date_naive(),
    }))
}

pub async fn save_pemodal(
    State(state): State<AppState>,
    Json(payload): Json<SavePemodalRequest>,
) -> Result<(StatusCode, Json<SavePemodalResponse>), (StatusCode, Json<serde_json::Value>)> {
    let tanggal = date::parse_date(&payload.tanggal).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": format!("Invalid date format: {}", e)})),
        )
    })?;

    if payload.mode == "edit" {
        let result = sqlx::query(
            "UPDATE pemodal SET nama = ?, jumlah = ?, tanggal = ? WHERE id_pemodal = ?",
        )
        .bind(&payload.nama)
        .bind(payload.jumlah)
        .bind(tanggal)
        .bind(&payload.id_pemodal)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error updating pemodal: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;
        if result.rows_affected() == 0 {
            return Err((
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Pemodal tidak ditemukan"})),
            ));
        }

        Ok((
            StatusCode::OK,
            Json(SavePemodalResponse {
                id_pemodal: payload.id_pemodal,
                message: "Setoran modal diperbarui".to_string(),
            }),
        ))
    } else {
        let new_id = next_id(&state.db_pool, Entity::Pemodal).await.map_err(|e| {
            tracing::error!("Error generating pemodal id: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        sqlx::query("INSERT INTO pemodal (id_pemodal, nama, jumlah, tanggal) VALUES (?, ?, ?, ?)")
            .bind(&new_id)
            .bind(&payload.nama)
            .bind(payload.jumlah)
            .bind(tanggal)
            .execute(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error creating pemodal: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        Ok((
            StatusCode::CREATED,
            Json(SavePemodalResponse {
                id_pemodal: new_id,
                message: "Setoran modal dicatat".to_string(),
            }),
        ))
    }
}
