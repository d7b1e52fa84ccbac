//! Stock column helpers for the purchase flow.
//!
//! The purchase-side decrement floor-clamps at zero; the sale flow adjusts
//! `stok_akhir` directly without clamping (see services::sales).

use sqlx::SqlitePool;

pub async fn add_stock(pool: &SqlitePool, id_barang: &str, jumlah: i64) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE barang SET stok_akhir = stok_akhir + ? WHERE id_barang = ?")
        .bind(jumlah)
        .bind(id_barang)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn reduce_stock(
    pool: &SqlitePool,
    id_barang: &str,
    jumlah: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE barang SET stok_akhir = MAX(0, stok_akhir - ?) WHERE id_barang = ?")
        .bind(jumlah)
        .bind(id_barang)
        .execute(pool)
        .await?;
    Ok(())
}
