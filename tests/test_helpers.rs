// Shared helpers for integration tests: in-memory store plus fixture rows.
// Fixture inserts write rows directly and do NOT touch stok_akhir; tests that
// care about stock go through the services or the API.

#![allow(dead_code)]

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use waserda_api::database;
use waserda_api::services::whatsapp::WaClient;
use waserda_api::{AppState, Config};

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory sqlite");
    database::init_schema(&pool)
        .await
        .expect("failed to create schema");
    pool
}

pub fn test_state(pool: SqlitePool) -> AppState {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        port: 0,
        // Nothing listens here; receipt sends fail fast and are logged only.
        wa_gateway_url: "http://127.0.0.1:9/send-message".to_string(),
        cash_item_token: "KAS".to_string(),
    };
    AppState {
        db_pool: Arc::new(pool),
        wa_client: WaClient::new(config.wa_gateway_url.clone()),
        config: Arc::new(config),
    }
}

pub async fn insert_barang(pool: &SqlitePool, id: &str, nama: &str, stok: i64) {
    sqlx::query(
        r#"
        INSERT INTO barang (id_barang, nama_barang, satuan, kategori, stok_akhir)
        VALUES (?, ?, 'pcs', 'Sembako', ?)
        "#,
    )
    .bind(id)
    .bind(nama)
    .bind(stok)
    .execute(pool)
    .await
    .expect("insert barang");
}

pub async fn insert_pembelian(
    pool: &SqlitePool,
    id: &str,
    tanggal: &str,
    id_barang: &str,
    jumlah: i64,
    harga_beli: i64,
) {
    sqlx::query(
        r#"
        INSERT INTO pembelian (id_pembelian, tanggal, id_barang, nama_barang,
                               jumlah, harga_beli, total_beli, keterangan)
        VALUES (?, ?, ?, '', ?, ?, ?, '')
        "#,
    )
    .bind(id)
    .bind(tanggal)
    .bind(id_barang)
    .bind(jumlah)
    .bind(harga_beli)
    .bind(jumlah * harga_beli)
    .execute(pool)
    .await
    .expect("insert pembelian");
}

pub async fn insert_penjualan_line(
    pool: &SqlitePool,
    id: &str,
    tanggal: &str,
    total: i64,
    laba: i64,
) {
    sqlx::query(
        r#"
        INSERT INTO penjualan (id_penjualan, tanggal, id_pelanggan, id_barang, nama_barang,
                               jumlah, harga_jual, total, catatan, hpp_unit, laba)
        VALUES (?, ?, 'PL001', 'BRG001', '', 1, ?, ?, '', 0, ?)
        "#,
    )
    .bind(id)
    .bind(tanggal)
    .bind(total)
    .bind(total)
    .bind(laba)
    .execute(pool)
    .await
    .expect("insert penjualan");
}

pub async fn insert_pelanggan(pool: &SqlitePool, id: &str, nama: &str, wa: &str) {
    sqlx::query("INSERT INTO pelanggan (id_pelanggan, nama, wa) VALUES (?, ?, ?)")
        .bind(id)
        .bind(nama)
        .bind(wa)
        .execute(pool)
        .await
        .expect("insert pelanggan");
}

pub async fn insert_pengeluaran(pool: &SqlitePool, id: &str, tanggal: &str, jumlah: i64) {
    sqlx::query(
        r#"
        INSERT INTO pengeluaran (id_pengeluaran, tanggal, kategori, jumlah, keterangan)
        VALUES (?, ?, 'Lainnya', ?, '')
        "#,
    )
    .bind(id)
    .bind(tanggal)
    .bind(jumlah)
    .execute(pool)
    .await
    .expect("insert pengeluaran");
}

pub async fn insert_pemodal(pool: &SqlitePool, id: &str, tanggal: &str, jumlah: i64) {
    sqlx::query("INSERT INTO pemodal (id_pemodal, nama, jumlah, tanggal) VALUES (?, 'Investor', ?, ?)")
        .bind(id)
        .bind(jumlah)
        .bind(tanggal)
        .execute(pool)
        .await
        .expect("insert pemodal");
}

pub async fn stok(pool: &SqlitePool, id_barang: &str) -> i64 {
    sqlx::query_scalar("SELECT stok_akhir FROM barang WHERE id_barang = ?")
        .bind(id_barang)
        .fetch_one(pool)
        .await
        .expect("fetch stok")
}
