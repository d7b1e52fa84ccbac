use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::models::ids::{next_id, Entity};
use crate::models::{Barang, Pembelian};
use crate::services::stock;
use crate::utils::date;
use crate::AppState;

#[derive(Serialize)]
pub struct BarangOption {
    pub id: String,
    pub nama: String,
    pub stok: i64,
    pub satuan: String,
}

#[derive(Deserialize)]
pub struct PembelianListQuery {
    pub edit: Option<String>,
}

/// Purchase list is scoped to the current month; older lots stay in the
/// store for costing but are not shown here.
#[derive(Serialize)]
pub struct PembelianListResponse {
    pub data: Vec<Pembelian>,
    pub barang_options: Vec<BarangOption>,
    pub item_edit: Option<Pembelian>,
}

#[derive(Deserialize)]
pub struct SavePembelianRequest {
    /// A "PB"-prefixed id switches the save into edit mode.
    #[serde(default)]
    pub id_pembelian: String,
    pub id_barang: String,
    pub jumlah: i64,
    pub harga_beli: i64,
    #[serde(default)]
    pub keterangan: String,
}

#[derive(Serialize)]
pub struct SavePembelianResponse {
    pub id_pembelian: String,
    pub message: String,
}

pub async fn list_pembelian(
    State(state): State<AppState>,
    Query(query): Query<PembelianListQuery>,
) -> Result<Json<PembelianListResponse>, (StatusCode, Json<serde_json::Value>)> {
    let (bulan, tahun) = date::month_key(Local::now().date_naive());

    let data = sqlx::query_as::<_, Pembelian>(
        r#"
        SELECT * FROM pembelian
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_all(&*state.db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Error fetching pembelian: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Database error"})),
        )
    })?;

    let barang = sqlx::query_as::<_, Barang>("SELECT * FROM barang")
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching barang options: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;
    let barang_options = barang
        .into_iter()
        .map(|b| BarangOption {
            id: b.id_barang,
            nama: b.nama_barang,
            stok: b.stok_akhir,
            satuan: b.satuan,
        })
        .collect();

    let item_edit = match query.edit.as_deref() {
        Some(id) => {
            sqlx::query_as::<_, Pembelian>("SELECT * FROM pembelian WHERE id_pembelian = ?")
                .bind(id)
                .fetch_optional(&*state.db_pool)
                .await
                .map_err(|e| {
                    tracing::error!("Error fetching pembelian for edit: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({"error": "Database error"})),
                    )
                })?
        }
        None => None,
    };

    Ok(Json(PembelianListResponse {
        data,
        barang_options,
        item_edit,
    }))
}

pub async fn save_pembelian(
    State(state): State<AppState>,
    Json(payload): Json<SavePembelianRequest>,
) -> Result<(StatusCode, Json<SavePembelianResponse>), (StatusCode, Json<serde_json::Value>)> {
    let nama_barang: Option<String> =
        sqlx::query_scalar("SELECT nama_barang FROM barang WHERE id_barang = ?")
            .bind(&payload.id_barang)
            .fetch_optional(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error looking up barang: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;
    let Some(nama_barang) = nama_barang else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Barang tidak ditemukan"})),
        ));
    };

    let total = payload.jumlah * payload.harga_beli;
    let today = Local::now().date_naive();

    let id = payload.id_pembelian.trim();
    if !id.is_empty() && id.starts_with("PB") {
        let old: Option<(String, i64)> =
            sqlx::query_as("SELECT id_barang, jumlah FROM pembelian WHERE id_pembelian = ?")
                .bind(id)
                .fetch_optional(&*state.db_pool)
                .await
                .map_err(|e| {
                    tracing::error!("Error fetching pembelian: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({"error": "Database error"})),
                    )
                })?;
        let Some((old_barang, old_jumlah)) = old else {
            return Err((
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Pembelian tidak ditemukan"})),
            ));
        };

        // Reverse the old quantity's stock effect, then apply the new one.
        stock::reduce_stock(&state.db_pool, &old_barang, old_jumlah)
            .await
            .map_err(|e| {
                tracing::error!("Error reversing stock: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        sqlx::query(
            r#"
            UPDATE pembelian
            SET tanggal = ?, id_barang = ?, nama_barang = ?, jumlah = ?, harga_beli = ?,
                total_beli = ?, keterangan = ?
            WHERE id_pembelian = ?
            "#,
        )
        .bind(today)
        .bind(&payload.id_barang)
        .bind(&nama_barang)
        .bind(payload.jumlah)
        .bind(payload.harga_beli)
        .bind(total)
        .bind(&payload.keterangan)
        .bind(id)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error updating pembelian: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        stock::add_stock(&state.db_pool, &payload.id_barang, payload.jumlah)
            .await
            .map_err(|e| {
                tracing::error!("Error applying stock: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        Ok((
            StatusCode::OK,
            Json(SavePembelianResponse {
                id_pembelian: id.to_string(),
                message: "Pembelian diperbarui".to_string(),
            }),
        ))
    } else {
        let new_id = next_id(&state.db_pool, Entity::Pembelian)
            .await
            .map_err(|e| {
                tracing::error!("Error generating pembelian id: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        sqlx::query(
            r#"
            INSERT INTO pembelian (id_pembelian, tanggal, id_barang, nama_barang,
                                   jumlah, harga_beli, total_beli, keterangan)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_id)
        .bind(today)
        .bind(&payload.id_barang)
        .bind(&nama_barang)
        .bind(payload.jumlah)
        .bind(payload.harga_beli)
        .bind(total)
        .bind(&payload.keterangan)
        .execute(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error creating pembelian: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

        stock::add_stock(&state.db_pool, &payload.id_barang, payload.jumlah)
            .await
            .map_err(|e| {
                tracing::error!("Error applying stock: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;

        Ok((
            StatusCode::CREATED,
            Json(SavePembelianResponse {
                id_pembelian: new_id,
                message: "Pembelian dicatat".to_string(),
            }),
        ))
    }
}
