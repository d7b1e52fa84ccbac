// Endpoint-level tests through the router, against an in-memory store.

mod test_helpers;
use test_helpers::*;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use waserda_api::router;

async fn server() -> (TestServer, SqlitePool) {
    let pool = setup_test_db().await;
    let state = test_state(pool.clone());
    let server = TestServer::new(router(state)).expect("test server");
    (server, pool)
}

#[tokio::test]
async fn create_then_list_barang() {
    let (server, _pool) = server().await;

    let res = server
        .post("/api/barang")
        .json(&json!({"nama_barang": "Gula", "satuan": "kg", "kategori": "Sembako"}))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["id_barang"], "BRG001");

    let res = server.get("/api/barang").await;
    res.assert_status_ok();
    let body: Value = res.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["nama_barang"], "Gula");
    assert_eq!(data[0]["stok_akhir"], 0);
    assert!(body["satuan_options"]
        .as_array()
        .unwrap()
        .contains(&json!("pcs")));
    assert!(body["kategori_options"]
        .as_array()
        .unwrap()
        .contains(&json!("Sembako")));
}

#[tokio::test]
async fn prefixed_id_switches_save_into_edit_mode() {
    let (server, _pool) = server().await;

    server
        .post("/api/barang")
        .json(&json!({"nama_barang": "Gula", "satuan": "kg", "kategori": "Sembako"}))
        .await
        .assert_status(StatusCode::CREATED);

    let res = server
        .post("/api/barang")
        .json(&json!({
            "id_barang": "BRG001",
            "nama_barang": "Gula Pasir",
            "satuan": "kg",
            "kategori": "Sembako"
        }))
        .await;
    res.assert_status(StatusCode::OK);

    let res = server.get("/api/barang").await;
    let body: Value = res.json();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["nama_barang"], "Gula Pasir");
}

#[tokio::test]
async fn purchase_adds_stock_and_edit_reverses_it() {
    let (server, pool) = server().await;
    insert_barang(&pool, "BRG001", "Beras", 0).await;

    let res = server
        .post("/api/pembelian")
        .json(&json!({"id_barang": "BRG001", "jumlah": 10, "harga_beli": 100}))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["id_pembelian"], "PB001");
    assert_eq!(stok(&pool, "BRG001").await, 10);

    let res = server
        .post("/api/pembelian")
        .json(&json!({
            "id_pembelian": "PB001",
            "id_barang": "BRG001",
            "jumlah": 4,
            "harga_beli": 100
        }))
        .await;
    res.assert_status(StatusCode::OK);
    assert_eq!(stok(&pool, "BRG001").await, 4);
}

#[tokio::test]
async fn purchase_of_unknown_item_is_not_found() {
    let (server, _pool) = server().await;
    let res = server
        .post("/api/pembelian")
        .json(&json!({"id_barang": "BRG404", "jumlah": 1, "harga_beli": 100}))
        .await;
    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sale_records_lines_and_serves_the_receipt_view() {
    let (server, pool) = server().await;
    insert_barang(&pool, "BRG001", "Beras", 0).await;
    insert_pelanggan(&pool, "PL001", "Budi", "628123456").await;

    server
        .post("/api/pembelian")
        .json(&json!({"id_barang": "BRG001", "jumlah": 10, "harga_beli": 100}))
        .await
        .assert_status(StatusCode::CREATED);

    let res = server
        .post("/api/penjualan")
        .json(&json!({
            "id_pelanggan": "PL001",
            "catatan": "lunas",
            "items": [{"id_barang": "BRG001", "jumlah": 2, "harga_jual": 150}]
        }))
        .await;
    res.assert_status(StatusCode::CREATED);
    let body: Value = res.json();
    assert_eq!(body["id_penjualan"], "PJ001");
    assert_eq!(body["total"], 300);
    assert_eq!(stok(&pool, "BRG001").await, 8);

    let res = server.get("/api/penjualan/PJ001").await;
    res.assert_status_ok();
    let nota: Value = res.json();
    assert_eq!(nota["nama_pelanggan"], "Budi");
    assert_eq!(nota["total"], 300);
    assert_eq!(nota["item_list"].as_array().unwrap().len(), 1);
    assert_eq!(nota["item_list"][0]["nama"], "Beras");

    let res = server.get("/api/penjualan/PJ999").await;
    res.assert_status(StatusCode::NOT_FOUND);
    let err: Value = res.json();
    assert_eq!(err["error"], "Transaksi tidak ditemukan");
}

#[tokio::test]
async fn empty_sale_is_rejected() {
    let (server, _pool) = server().await;
    let res = server
        .post("/api/penjualan")
        .json(&json!({"id_pelanggan": "PL001", "items": []}))
        .await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sale_form_excludes_out_of_stock_items() {
    let (server, pool) = server().await;
    insert_barang(&pool, "BRG001", "Beras", 0).await;
    insert_barang(&pool, "BRG002", "Gula", 0).await;
    server
        .post("/api/pembelian")
        .json(&json!({"id_barang": "BRG001", "jumlah": 5, "harga_beli": 100}))
        .await
        .assert_status(StatusCode::CREATED);

    let res = server.get("/api/penjualan/form").await;
    res.assert_status_ok();
    let body: Value = res.json();
    let barang = body["barang_data"].as_array().unwrap();
    assert_eq!(barang.len(), 1);
    assert_eq!(barang[0]["id_barang"], "BRG001");
    assert_eq!(body["harga_terakhir"]["BRG001"], 100);
    assert_eq!(body["edit"], false);
}

#[tokio::test]
async fn sale_form_for_unknown_edit_id_is_not_found() {
    let (server, _pool) = server().await;
    let res = server.get("/api/penjualan/form?edit=PJ999").await;
    res.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn laporan_defaults_to_the_current_month() {
    let (server, _pool) = server().await;

    let res = server.get("/api/laporan").await;
    res.assert_status_ok();
    let body: Value = res.json();
    assert_eq!(body["total_laba"], 0);
    assert_eq!(body["bagian_kamu"], 0);
    assert!(body["ringkasan_harian"].as_array().unwrap().is_empty());

    let res = server.get("/api/laporan?bulan=13").await;
    res.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let (server, _pool) = server().await;
    let res = server.get("/health").await;
    res.assert_status_ok();
    assert_eq!(res.text(), "OK");
}
