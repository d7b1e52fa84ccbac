//! Sale transaction recorder.
//!
//! A sale is N lines sharing one transaction id. Each line is costed with
//! FIFO against the item's purchase history at recording time and the cost
//! is frozen on the row; editing purchases later never re-costs history.
//! Editing a sale restores stock for the old lines and deletes them before
//! the corrected lines are written with freshly computed costs.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::ids::{self, Entity};
use crate::services::costing::{self, Lot};

#[derive(Debug, Error)]
pub enum SaleError {
    #[error("Barang tidak ditemukan: {0}")]
    UnknownItem(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct SaleLineInput {
    pub id_barang: String,
    pub jumlah: i64,
    pub harga_jual: i64,
}

#[derive(Debug, Clone)]
pub struct SaleInput {
    /// Existing transaction id when editing; None records a new sale.
    pub edit_id: Option<String>,
    pub id_pelanggan: String,
    pub catatan: String,
    pub tanggal: NaiveDate,
    pub lines: Vec<SaleLineInput>,
}

#[derive(Debug, Clone)]
pub struct RecordedLine {
    pub nama_barang: String,
    pub jumlah: i64,
    pub harga_jual: i64,
}

#[derive(Debug, Clone)]
pub struct RecordedSale {
    pub id_penjualan: String,
    pub total: i64,
    pub lines: Vec<RecordedLine>,
}

pub async fn record_sale(pool: &SqlitePool, input: SaleInput) -> Result<RecordedSale, SaleError> {
    let id_penjualan = match &input.edit_id {
        Some(id) => {
            // Reverse the old lines' stock effect before replacing them.
            let old_lines: Vec<(String, i64)> =
                sqlx::query_as("SELECT id_barang, jumlah FROM penjualan WHERE id_penjualan = ?")
                    .bind(id)
                    .fetch_all(pool)
                    .await?;
            for (id_barang, jumlah) in &old_lines {
                sqlx::query("UPDATE barang SET stok_akhir = stok_akhir + ? WHERE id_barang = ?")
                    .bind(jumlah)
                    .bind(id_barang)
                    .execute(pool)
                    .await?;
            }
            sqlx::query("DELETE FROM penjualan WHERE id_penjualan = ?")
                .bind(id)
                .execute(pool)
                .await?;
            id.clone()
        }
        None => ids::next_id(pool, Entity::Penjualan).await?,
    };

    let mut recorded = Vec::with_capacity(input.lines.len());
    let mut total_all: i64 = 0;

    for line in &input.lines {
        let nama_barang: Option<String> =
            sqlx::query_scalar("SELECT nama_barang FROM barang WHERE id_barang = ?")
                .bind(&line.id_barang)
                .fetch_optional(pool)
                .await?;
        let nama_barang =
            nama_barang.ok_or_else(|| SaleError::UnknownItem(line.id_barang.clone()))?;

        // Lots dated after the sale never participate in its cost.
        let lots: Vec<Lot> = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT jumlah, harga_beli FROM pembelian
            WHERE id_barang = ? AND tanggal <= ?
            ORDER BY tanggal ASC, rowid ASC
            "#,
        )
        .bind(&line.id_barang)
        .bind(input.tanggal)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|(jumlah, harga_beli)| Lot { jumlah, harga_beli })
        .collect();

        let hpp_unit = costing::fifo_unit_cost(&lots, line.jumlah);
        let laba = (line.harga_jual - hpp_unit) * line.jumlah;
        let total = line.jumlah * line.harga_jual;

        sqlx::query(
            r#"
            INSERT INTO penjualan (id_penjualan, tanggal, id_pelanggan, id_barang, nama_barang,
                                   jumlah, harga_jual, total, catatan, hpp_unit, laba)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id_penjualan)
        .bind(input.tanggal)
        .bind(&input.id_pelanggan)
        .bind(&line.id_barang)
        .bind(&nama_barang)
        .bind(line.jumlah)
        .bind(line.harga_jual)
        .bind(total)
        .bind(&input.catatan)
        .bind(hpp_unit)
        .bind(laba)
        .execute(pool)
        .await?;

        // No floor clamp: an oversell drives stock negative and stays
        // visible in the item list instead of being silently absorbed.
        sqlx::query("UPDATE barang SET stok_akhir = stok_akhir - ? WHERE id_barang = ?")
            .bind(line.jumlah)
            .bind(&line.id_barang)
            .execute(pool)
            .await?;

        recorded.push(RecordedLine {
            nama_barang,
            jumlah: line.jumlah,
            harga_jual: line.harga_jual,
        });
        total_all += total;
    }

    Ok(RecordedSale {
        id_penjualan,
        total: total_all,
        lines: recorded,
    })
}
