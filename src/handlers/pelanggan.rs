use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::models::ids::{next_id, Entity};
use crate::models::Pelanggan;
use crate::AppState;

#[derive(Deserialize)]
pub struct PelangganListQuery {
    pub edit: Option<String>,
}

#[derive(Serialize)]
pub struct PelangganListResponse {
    pub rows: Vec<Pelanggan>,
    pub item_edit: Option<Pelanggan>,
}

#[derive(Deserialize)]
pub struct SavePelangganRequest {
    #[serde(default)]
    pub id_pelanggan: String,
    pub nama: String,
    pub wa: String,
    /// "edit" updates an existing row; anything else inserts a new one.
    #[serde(default)]
    pub mode: String,
}

#[derive(Serialize)]
pub struct SavePelangganResponse {
    pub id_pelanggan: String,
    pub message: String,
}

pub async fn list_pelanggan(
    State(state): State<AppState>,
    Query(query): Query<PelangganListQuery>,
) -> Result<Json<PelangganListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let rows = sqlx::query_as::<_, Pelanggan>("SELECT * FROM pelanggan")
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching pelanggan: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

    let item_edit = match query.edit.as_deref() {
        Some(id) => {
            sqlx::query_as::<_, Pelanggan>("SELECT * FROM pelanggan WHERE id_pelanggan = ?")
                .bind(id)
                .fetch_optional(&*state.db_pool)
                .await
                .map_err(|e| {
                    tracing::error!("Error fetching pelanggan for edit: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({"error": "Database error"})),
                    )
                })?
        }
        None => None,
    };

    Ok(Json(PelangganListResponse { rows, item_edit }))
}

pub async fn save_pelanggan(
    State(state): State<AppState>,
    Json(payload): Json<SavePelangganRequest>,
) -> Result<(StatusCode, Json<SavePelangganResponse>), (StatusCode, Json<serde_json::Value>)> {
    if payload.nama.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Nama pelanggan wajib diisi"})),
        ));
    }

    if payload.mode == "edit" {
        let result = sqlx::query("UPDATE pelanggan SET nama = ?, wa = ? WHERE id_pelanggan = ?")
            .bind(&payload.nama)
            .bind(&payload.wa)
            .bind(&payload.id_pelanggan)
            .execute(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error updating pelanggan: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;
        if result.rows_affected() == 0 {
            return Err((
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Pelanggan tidak ditemukan"})),
            ));
        }

        Ok((
            StatusCode::OK,
            Json(SavePelangganResponse {
                id_pelanggan: payload.id_pelanggan,
                message: "Pelanggan diperbarui".to_string(),
            }),
        ))
    } else {
        let new_id = next_id(&state.db_pool, Entity::Pelanggan)
            .await
            .map_err(|e| {
                tracing::error!("Error generating pelanggan id: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        sqlx::query("INSERT INTO pelanggan (id_pelanggan, nama, wa) VALUES (?, ?, ?)")
            .bind(&new_id)
            .bind(&payload.nama)
            .bind(&payload.wa)
            .execute(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error creating pelanggan: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        Ok((
            StatusCode::CREATED,
            Json(SavePelangganResponse {
                id_pelanggan: new_id,
                message: "Pelanggan ditambahkan".to_string(),
            }),
        ))
    }
}
