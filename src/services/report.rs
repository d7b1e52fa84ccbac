//! Monthly financial report: period sums, inventory valuation, cash
//! attribution of expenses, and the three-way profit split.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::utils::date;

const OPERATOR_SHARE: f64 = 0.30;
const RESERVE_SHARE: f64 = 0.35;

#[derive(Debug, Clone, Serialize)]
pub struct RingkasanHarian {
    pub tanggal: NaiveDate,
    pub penjualan: i64,
    pub laba: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Laporan {
    pub bulan: String,
    pub tahun: String,
    pub total_modal: i64,
    pub total_pengeluaran: i64,
    pub pengeluaran_dari_kas: i64,
    pub pengeluaran_dari_pemodal: i64,
    pub modal_belanja: i64,
    pub kas_manual: i64,
    pub total_nilai_barang: i64,
    pub total_penjualan: i64,
    pub total_laba: i64,
    pub sisa_kas_awal: i64,
    pub sisa_kas_akhir: i64,
    pub bagian_kamu: i64,
    pub bagian_kas: i64,
    pub bagian_pemodal: i64,
    pub ringkasan_harian: Vec<RingkasanHarian>,
}

/// Split profit 30% operator / 35% cash reserve / remainder investors.
/// The investor share absorbs the rounding, so the three parts always sum
/// to `total_laba` exactly. Non-positive profit is not split.
pub fn split_profit(total_laba: i64) -> (i64, i64, i64) {
    if total_laba <= 0 {
        return (0, 0, 0);
    }
    let bagian_kamu = (total_laba as f64 * OPERATOR_SHARE).round() as i64;
    let bagian_kas = (total_laba as f64 * RESERVE_SHARE).round() as i64;
    let bagian_pemodal = total_laba - bagian_kamu - bagian_kas;
    (bagian_kamu, bagian_kas, bagian_pemodal)
}

pub async fn monthly_report(
    pool: &SqlitePool,
    month: u32,
    year: i32,
    cash_item_token: &str,
) -> anyhow::Result<Laporan> {
    let (bulan, tahun) = date::month_key_for(month, year);
    let period_end = date::month_end(year, month)
        .ok_or_else(|| anyhow::anyhow!("invalid report period {}-{:02}", year, month))?;

    let total_modal: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(jumlah), 0) FROM pemodal
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_one(pool)
    .await?;

    let total_pengeluaran: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(jumlah), 0) FROM pengeluaran
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_one(pool)
    .await?;

    let penjualan_rows: Vec<(NaiveDate, i64, i64)> = sqlx::query_as(
        r#"
        SELECT tanggal, total, laba FROM penjualan
        WHERE strftime('%m', tanggal) = ? AND strftime('%Y', tanggal) = ?
        "#,
    )
    .bind(&bulan)
    .bind(&tahun)
    .fetch_all(pool)
    .await?;

    let mut total_penjualan: i64 = 0;
    let mut total_laba: i64 = 0;
    // BTreeMap keeps the day-by-day breakdown sorted ascending.
    let mut harian: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for (tanggal, total, laba) in penjualan_rows {
        total_penjualan += total;
        total_laba += laba;
        let entry = harian.entry(tanggal).or_insert((0, 0));
        entry.0 += total;
        entry.1 += laba;
    }

    // Most recent purchase price per item among lots dated on/before the
    // period end; first row wins after the descending sort.
    let price_rows: Vec<(String, i64)> = sqlx::query_as(
        r#"
        SELECT id_barang, harga_beli FROM pembelian
        WHERE tanggal <= ?
        ORDER BY tanggal DESC, rowid DESC
        "#,
    )
    .bind(period_end)
    .fetch_all(pool)
    .await?;
    let mut harga_terakhir: HashMap<String, i64> = HashMap::new();
    for (id_barang, harga_beli) in price_rows {
        harga_terakhir.entry(id_barang).or_insert(harga_beli);
    }

    let barang_rows: Vec<(String, String, i64)> =
        sqlx::query_as("SELECT id_barang, nama_barang, stok_akhir FROM barang")
            .fetch_all(pool)
            .await?;

    let token = cash_item_token.to_uppercase();
    let mut kas_manual: i64 = 0;
    let mut total_nilai_barang: i64 = 0;
    for (id_barang, nama_barang, stok_akhir) in barang_rows {
        let harga = harga_terakhir.get(&id_barang).copied().unwrap_or(0);
        let subtotal = stok_akhir * harga;
        if nama_barang.to_uppercase().contains(&token) {
            kas_manual += subtotal;
        } else {
            total_nilai_barang += subtotal;
        }
    }

    let pengeluaran_dari_kas = kas_manual.min(total_pengeluaran);
    let pengeluaran_dari_pemodal = total_pengeluaran - pengeluaran_dari_kas;
    let modal_belanja = total_modal - pengeluaran_dari_pemodal;
    let sisa_kas_awal = modal_belanja - total_nilai_barang;
    let sisa_kas_akhir = sisa_kas_awal + total_laba;
    let (bagian_kamu, bagian_kas, bagian_pemodal) = split_profit(total_laba);

    let ringkasan_harian = harian
        .into_iter()
        .map(|(tanggal, (penjualan, laba))| RingkasanHarian {
            tanggal,
            penjualan,
            laba,
        })
        .collect();

    Ok(Laporan {
        bulan,
        tahun,
        total_modal,
        total_pengeluaran,
        pengeluaran_dari_kas,
        pengeluaran_dari_pemodal,
        modal_belanja,
        kas_manual,
        total_nilai_barang,
        total_penjualan,
        total_laba,
        sisa_kas_awal,
        sisa_kas_akhir,
        bagian_kamu,
        bagian_kas,
        bagian_pemodal,
        ringkasan_harian,
    })
}
