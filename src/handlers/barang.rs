use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::models::ids::{next_id, Entity};
use crate::models::Barang;
use crate::AppState;

const SATUAN_OPTIONS: &[&str] = &[
    "pcs", "bungkus", "botol", "dus", "liter", "kg", "pak", "sak", "renceng", "kaleng",
];
const KATEGORI_OPTIONS: &[&str] = &[
    "Minuman",
    "Makanan",
    "Kebersihan",
    "Sembako",
    "Perlengkapan",
    "Gas",
    "Rokok",
    "Lainnya",
];

#[derive(Deserialize)]
pub struct BarangListQuery {
    pub edit: Option<String>,
}

#[derive(Serialize)]
pub struct BarangListResponse {
    pub data: Vec<Barang>,
    pub item_edit: Option<Barang>,
    pub satuan_options: Vec<&'static str>,
    pub kategori_options: Vec<&'static str>,
}

#[derive(Deserialize)]
pub struct SaveBarangRequest {
    /// A "BRG"-prefixed id switches the save into edit mode.
    #[serde(default)]
    pub id_barang: String,
    pub nama_barang: String,
    pub satuan: String,
    pub kategori: String,
}

#[derive(Serialize)]
pub struct SaveBarangResponse {
    pub id_barang: String,
    pub message: String,
}

pub async fn list_barang(
    State(state): State<AppState>,
    Query(query): Query<BarangListQuery>,
) -> Result<Json<BarangListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let data = sqlx::query_as::<_, Barang>("SELECT * FROM barang")
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching barang: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

    let item_edit = match query.edit.as_deref() {
        Some(id) => sqlx::query_as::<_, Barang>("SELECT * FROM barang WHERE id_barang = ?")
            .bind(id)
            .fetch_optional(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching barang for edit: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?,
        None => None,
    };

    Ok(Json(BarangListResponse {
        data,
        item_edit,
        satuan_options: SATUAN_OPTIONS.to_vec(),
        kategori_options: KATEGORI_OPTIONS.to_vec(),
    }))
}

pub async fn save_barang(
    State(state): State<AppState>,
    Json(payload): Json<SaveBarangRequest>,
) -> Result<(StatusCode, Json<SaveBarangResponse>), (StatusCode, Json<serde_json::Value>)> {
    if payload.nama_barang.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Nama barang wajib diisi"})),
        ));
    }

    let id = payload.id_barang.trim();
    if !id.is_empty() && id.starts_with("BRG") {
        sqlx::query("UPDATE barang SET nama_barang = ?, satuan = ?, kategori = ? WHERE id_barang = ?")
            .bind(&payload.nama_barang)
            .bind(&payload.satuan)
            .bind(&payload.kategori)
            .bind(id)
            .execute(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error updating barang: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        Ok((
            StatusCode::OK,
            Json(SaveBarangResponse {
                id_barang: id.to_string(),
                message: "Barang diperbarui".to_string(),
            }),
        ))
    } else {
        let new_id = next_id(&state.db_pool, Entity::Barang).await.map_err(|e| {
            tracing::error!("Error generating barang id: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        sqlx::query(
            r#"
            INSERT INTO barang (id_barang, nama_barang, satuan, kategori, stok_akhir)
            VALUES (?, ?, ?, ?, 0)
            "#,
        )
        .bind(&new_id)
        .bind(&payload.nama_barang)
        .bind(&payload.satuan)
        .bind(&payload.kategori)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error creating barang: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        Ok((
            StatusCode::CREATED,
            Json(SaveBarangResponse {
                id_barang: new_id,
                message: "Barang ditambahkan".to_string(),
            }),
        ))
    }
}
