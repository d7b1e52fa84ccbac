use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Barang, Pelanggan, Penjualan};
use crate::services::sales::{self, SaleError, SaleInput, SaleLineInput};
use crate::services::whatsapp;
use crate::utils::date;
use crate::AppState;

#[derive(Serialize)]
pub struct TransaksiSummary {
    pub id_penjualan: String,
    pub tanggal: NaiveDate,
    pub id_pelanggan: String,
    pub nama_pelanggan: String,
    pub total: i64,
}

#[derive(Deserialize)]
pub struct SaleFormQuery {
    pub edit: Option<String>,
}

#[derive(Serialize)]
pub struct SaleFormResponse {
    pub pelanggan_data: Vec<Pelanggan>,
    pub barang_data: Vec<Barang>,
    /// Most recent purchase price per item, as the suggested sale basis.
    pub harga_terakhir: HashMap<String, i64>,
    pub edit: bool,
    pub id_penjualan: Option<String>,
    pub selected_pelanggan: Option<String>,
    pub catatan: Option<String>,
    pub baris: Vec<Penjualan>,
}

#[derive(Serialize)]
pub struct NotaItem {
    pub nama: String,
    pub jumlah: i64,
    pub harga: i64,
}

#[derive(Serialize)]
pub struct NotaResponse {
    pub id_penjualan: String,
    pub tanggal: NaiveDate,
    pub nama_pelanggan: String,
    pub catatan: String,
    pub item_list: Vec<NotaItem>,
    pub total: i64,
}

#[derive(Deserialize)]
pub struct SaleItemRequest {
    pub id_barang: String,
    pub jumlah: i64,
    pub harga_jual: i64,
}

#[derive(Deserialize)]
pub struct SavePenjualanRequest {
    /// A "PJ"-prefixed id re-records an existing transaction.
    #[serde(default)]
    pub edit_id: Option<String>,
    pub id_pelanggan: String,
    #[serde(default)]
    pub catatan: String,
    pub items: Vec<SaleItemRequest>,
}

#[derive(Serialize)]
pub struct SavePenjualanResponse {
    pub id_penjualan: String,
    pub total: i64,
}

async fn pelanggan_map(
    state: &AppState,
) -> Result<HashMap<String, Pelanggan>, (StatusCode, Json<serde_json::Value>)> {
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
    Ok(rows
        .into_iter()
        .map(|p| (p.id_pelanggan.clone(), p))
        .collect())
}

/// Current month's transactions, one summary row per transaction id.
pub async fn list_penjualan(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransaksiSummary>>, (StatusCode, Json<serde_json::Value>)> {
    let (bulan, tahun) = date::month_key(Local::now().date_naive());

    let rows = sqlx::query_as::<_, Penjualan>(
        r#"
        SELECT * FROM penjualan
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_all(&*state.db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Error fetching penjualan: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Database error"})),
        )
    })?;

    let pelanggan = pelanggan_map(&state).await?;

    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, TransaksiSummary> = HashMap::new();
    for row in rows {
        if let Some(summary) = grouped.get_mut(&row.id_penjualan) {
            summary.total += row.total;
            continue;
        }
        let nama_pelanggan = pelanggan
            .get(&row.id_pelanggan)
            .map(|p| p.nama.clone())
            .unwrap_or_else(|| "Tidak Dikenal".to_string());
        order.push(row.id_penjualan.clone());
        grouped.insert(
            row.id_penjualan.clone(),
            TransaksiSummary {
                id_penjualan: row.id_penjualan,
                tanggal: row.tanggal,
                id_pelanggan: row.id_pelanggan,
                nama_pelanggan,
                total: row.total,
            },
        );
    }
    let transaksi = order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .collect();

    Ok(Json(transaksi))
}

/// Data for the sale form: customers, sellable items, suggested prices and,
/// when editing, the existing lines.
pub async fn sale_form(
    State(state): State<AppState>,
    Query(query): Query<SaleFormQuery>,
) -> Result<Json<SaleFormResponse>, (StatusCode, Json<serde_json::Value>)> {
    let pelanggan_data = sqlx::query_as::<_, Pelanggan>("SELECT * FROM pelanggan")
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching pelanggan: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;

    let price_rows: Vec<(String, i64)> = sqlx::query_as(
        "SELECT id_barang, harga_beli FROM pembelian ORDER BY tanggal DESC, rowid DESC",
    )
    .fetch_all(&*state.db_pool)
    .await
    .map_err(|e| {
        tracing::error!("Error fetching harga terakhir: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "Database error"})),
        )
    })?;
    let mut harga_terakhir: HashMap<String, i64> = HashMap::new();
    for (id_barang, harga_beli) in price_rows {
        harga_terakhir.entry(id_barang).or_insert(harga_beli);
    }

    match query.edit {
        Some(id) => {
            let baris = sqlx::query_as::<_, Penjualan>(
                "SELECT * FROM penjualan WHERE id_penjualan = ?",
            )
            .bind(&id)
            .fetch_all(&*state.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Error fetching penjualan for edit: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            })?;
            if baris.is_empty() {
                return Err((
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({"error": "Transaksi tidak ditemukan"})),
                ));
            }

            let barang_data = sqlx::query_as::<_, Barang>("SELECT * FROM barang")
                .fetch_all(&*state.db_pool)
                .await
                .map_err(|e| {
                    tracing::error!("Error fetching barang: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(serde_json::json!({"error": "Database error"})),
                    )
                })?;

            Ok(Json(SaleFormResponse {
                pelanggan_data,
                barang_data,
                harga_terakhir,
                edit: true,
                id_penjualan: Some(id),
                selected_pelanggan: Some(baris[0].id_pelanggan.clone()),
                catatan: Some(baris[0].catatan.clone()),
                baris,
            }))
        }
        None => {
            let barang_data =
                sqlx::query_as::<_, Barang>("SELECT * FROM barang WHERE stok_akhir > 0")
                    .fetch_all(&*state.db_pool)
                    .await
                    .map_err(|e| {
                        tracing::error!("Error fetching barang: {:?}", e);
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(serde_json::json!({"error": "Database error"})),
                        )
                    })?;

            Ok(Json(SaleFormResponse {
                pelanggan_data,
                barang_data,
                harga_terakhir,
                edit: false,
                id_penjualan: None,
                selected_pelanggan: None,
                catatan: None,
                baris: Vec::new(),
            }))
        }
    }
}

/// Receipt view for one transaction.
pub async fn get_penjualan(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<NotaResponse>, (StatusCode, Json<serde_json::Value>)> {
    let rows = sqlx::query_as::<_, Penjualan>("SELECT * FROM penjualan WHERE id_penjualan = ?")
        .bind(&id)
        .fetch_all(&*state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Error fetching penjualan: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Database error"})),
            )
        })?;
    if rows.is_empty() {
        return Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Transaksi tidak ditemukan"})),
        ));
    }

    let pelanggan = pelanggan_map(&state).await?;
    let nama_pelanggan = pelanggan
        .get(&rows[0].id_pelanggan)
        .map(|p| p.nama.clone())
        .unwrap_or_else(|| "Tidak Dikenal".to_string());

    let total = rows.iter().map(|r| r.total).sum();
    let item_list = rows
        .iter()
        .map(|r| NotaItem {
            nama: r.nama_barang.clone(),
            jumlah: r.jumlah,
            harga: r.harga_jual,
        })
        .collect();

    Ok(Json(NotaResponse {
        id_penjualan: id,
        tanggal: rows[0].tanggal,
        nama_pelanggan,
        catatan: rows[0].catatan.clone(),
        item_list,
        total,
    }))
}

pub async fn save_penjualan(
    State(state): State<AppState>,
    Json(payload): Json<SavePenjualanRequest>,
) -> Result<(StatusCode, Json<SavePenjualanResponse>), (StatusCode, Json<serde_json::Value>)> {
    if payload.items.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Daftar belanja kosong"})),
        ));
    }

    let edit_id = payload.edit_id.clone().filter(|id| id.starts_with("PJ"));
    let is_edit = edit_id.is_some();
    let tanggal = Local::now().date_naive();

    let input = SaleInput {
        edit_id,
        id_pelanggan: payload.id_pelanggan.clone(),
        catatan: payload.catatan.clone(),
        tanggal,
        lines: payload
            .items
            .iter()
            .map(|item| SaleLineInput {
                id_barang: item.id_barang.clone(),
                jumlah: item.jumlah,
                harga_jual: item.harga_jual,
            })
            .collect(),
    };

    let recorded = sales::record_sale(&state.db_pool, input)
        .await
        .map_err(|e| match e {
            SaleError::UnknownItem(id) => (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": format!("Barang tidak ditemukan: {}", id)})),
            ),
            SaleError::Db(e) => {
                tracing::error!("Error recording sale: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": "Database error"})),
                )
            }
        })?;

    // The transaction is committed at this point; the receipt is best
    // effort and must never fail the request.
    match sqlx::query_as::<_, Pelanggan>("SELECT * FROM pelanggan WHERE id_pelanggan = ?")
        .bind(&payload.id_pelanggan)
        .fetch_optional(&*state.db_pool)
        .await
    {
        Ok(pelanggan) => {
            let (nama_pelanggan, nomor_wa) = pelanggan
                .map(|p| (p.nama, p.wa))
                .unwrap_or_else(|| ("Tidak Dikenal".to_string(), String::new()));
            let nota = whatsapp::format_receipt(
                tanggal,
                &nama_pelanggan,
                &nomor_wa,
                &recorded.lines,
                recorded.total,
                &payload.catatan,
            );
            let wa_client = state.wa_client.clone();
            tokio::spawn(async move {
                if let Err(e) = wa_client.send(&nomor_wa, &nota).await {
                    tracing::warn!("WhatsApp send failed (non-blocking): {:?}", e);
                }
            });
        }
        Err(e) => {
            tracing::warn!("Customer lookup for receipt failed (non-blocking): {:?}", e);
        }
    }

    let status = if is_edit {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((
        status,
        Json(SavePenjualanResponse {
            id_penjualan: recorded.id_penjualan,
            total: recorded.total,
        }),
    ))
}
