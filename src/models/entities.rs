//! Row types for the six store tables. Field names follow the column names
//! so the JSON payloads match what the store holds.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Barang {
    pub id_barang: String,
    pub nama_barang: String,
    pub satuan: String,
    pub kategori: String,
    pub stok_akhir: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pembelian {
    pub id_pembelian: String,
    pub tanggal: NaiveDate,
    pub id_barang: String,
    pub nama_barang: String,
    pub jumlah: i64,
    pub harga_beli: i64,
    pub total_beli: i64,
    pub keterangan: String,
}

/// One line of a sale. Lines of the same transaction share `id_penjualan`.
/// `hpp_unit` is the FIFO unit cost frozen at recording time; `laba` is the
/// line profit derived from it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Penjualan {
    pub id_penjualan: String,
    pub tanggal: NaiveDate,
    pub id_pelanggan: String,
    pub id_barang: String,
    pub nama_barang: String,
    pub jumlah: i64,
    pub harga_jual: i64,
    pub total: i64,
    pub catatan: String,
    pub hpp_unit: i64,
    pub laba: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pelanggan {
    pub id_pelanggan: String,
    pub nama: String,
    pub wa: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pengeluaran {
    pub id_pengeluaran: String,
    pub tanggal: NaiveDate,
    pub kategori: String,
    pub jumlah: i64,
    pub keterangan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Pemodal {
    pub id_pemodal: String,
    pub nama: String,
    pub jumlah: i64,
    pub tanggal: NaiveDate,
}
