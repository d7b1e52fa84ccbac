use sqlx::SqlitePool;
use std::sync::Arc;

pub type DatabasePool = Arc<SqlitePool>;

/// The whole store is one SQLite file. `mode=rwc` in the URL creates it on
/// first run; the integration tests connect to `sqlite::memory:` instead.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS barang (
        id_barang   TEXT PRIMARY KEY,
        nama_barang TEXT NOT NULL,
        satuan      TEXT NOT NULL,
        kategori    TEXT NOT NULL,
        stok_akhir  INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pembelian (
        id_pembelian TEXT PRIMARY KEY,
        tanggal      TEXT NOT NULL,
        id_barang    TEXT NOT NULL,
        nama_barang  TEXT NOT NULL,
        jumlah       INTEGER NOT NULL,
        harga_beli   INTEGER NOT NULL,
        total_beli   INTEGER NOT NULL,
        keterangan   TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS penjualan (
        id_penjualan TEXT NOT NULL,
        tanggal      TEXT NOT NULL,
        id_pelanggan TEXT NOT NULL,
        id_barang    TEXT NOT NULL,
        nama_barang  TEXT NOT NULL,
        jumlah       INTEGER NOT NULL,
        harga_jual   INTEGER NOT NULL,
        total        INTEGER NOT NULL,
        catatan      TEXT NOT NULL DEFAULT '',
        hpp_unit     INTEGER NOT NULL,
        laba         INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pelanggan (
        id_pelanggan TEXT PRIMARY KEY,
        nama         TEXT NOT NULL,
        wa           TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pengeluaran (
        id_pengeluaran TEXT PRIMARY KEY,
        tanggal        TEXT NOT NULL,
        kategori       TEXT NOT NULL,
        jumlah         INTEGER NOT NULL,
        keterangan     TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pemodal (
        id_pemodal TEXT PRIMARY KEY,
        nama       TEXT NOT NULL,
        jumlah     INTEGER NOT NULL,
        tanggal    TEXT NOT NULL
    )
    "#,
];

pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

pub async fn new_pool(database_url: &str) -> anyhow::Result<DatabasePool> {
    let pool = create_pool(database_url).await?;
    Ok(Arc::new(pool))
}

pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
