// Monthly report: period filtering, inventory valuation, cash attribution
// and the profit split.

mod test_helpers;
use test_helpers::*;

use waserda_api::services::report::{monthly_report, split_profit};
use waserda_api::utils::date::month_end;

#[test]
fn profit_split_shares_sum_exactly() {
    for total_laba in [1, 2, 3, 10, 33, 100, 1001, 99_999, 1_234_567] {
        let (bagian_kamu, bagian_kas, bagian_pemodal) = split_profit(total_laba);
        assert_eq!(
            bagian_kamu + bagian_kas + bagian_pemodal,
            total_laba,
            "shares must sum exactly for {}",
            total_laba
        );
        assert_eq!(bagian_kamu, (total_laba as f64 * 0.30).round() as i64);
        assert_eq!(bagian_kas, (total_laba as f64 * 0.35).round() as i64);
    }
}

#[test]
fn no_split_for_zero_or_negative_profit() {
    assert_eq!(split_profit(0), (0, 0, 0));
    assert_eq!(split_profit(-50), (0, 0, 0));
}

#[test]
fn month_end_handles_year_rollover_and_leap_years() {
    assert_eq!(month_end(2025, 12).unwrap().to_string(), "2025-12-31");
    assert_eq!(month_end(2024, 2).unwrap().to_string(), "2024-02-29");
    assert_eq!(month_end(2025, 2).unwrap().to_string(), "2025-02-28");
    assert!(month_end(2025, 13).is_none());
}

#[tokio::test]
async fn month_boundaries_are_disjoint() {
    let pool = setup_test_db().await;
    insert_penjualan_line(&pool, "PJ001", "2025-07-31", 100, 10).await;
    insert_penjualan_line(&pool, "PJ002", "2025-08-01", 200, 20).await;

    let july = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    assert_eq!(july.total_penjualan, 100);
    assert_eq!(july.total_laba, 10);
    assert_eq!(july.ringkasan_harian.len(), 1);

    let august = monthly_report(&pool, 8, 2025, "KAS").await.unwrap();
    assert_eq!(august.total_penjualan, 200);
    assert_eq!(august.total_laba, 20);
    assert_eq!(august.ringkasan_harian.len(), 1);
}

#[tokio::test]
async fn cash_items_fund_expenses_before_capital() {
    let pool = setup_test_db().await;
    // "KAS KECIL" is the cash drawer; one unit at the latest purchase price.
    insert_barang(&pool, "BRG001", "KAS KECIL", 1).await;
    insert_pembelian(&pool, "PB001", "2025-07-02", "BRG001", 1, 50_000).await;
    insert_barang(&pool, "BRG002", "Beras", 10).await;
    insert_pembelian(&pool, "PB002", "2025-07-03", "BRG002", 10, 2_000).await;
    insert_pemodal(&pool, "PM001", "2025-07-01", 100_000).await;
    insert_pengeluaran(&pool, "OUT001", "2025-07-10", 30_000).await;

    let laporan = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    assert_eq!(laporan.kas_manual, 50_000);
    assert_eq!(laporan.total_nilai_barang, 20_000);
    assert_eq!(laporan.total_pengeluaran, 30_000);
    assert_eq!(laporan.pengeluaran_dari_kas, 30_000);
    assert_eq!(laporan.pengeluaran_dari_pemodal, 0);
    assert_eq!(laporan.modal_belanja, 100_000);
    assert_eq!(laporan.sisa_kas_awal, 80_000);
    assert_eq!(laporan.sisa_kas_akhir, 80_000);
    assert_eq!(laporan.bagian_kamu, 0);
}

#[tokio::test]
async fn expenses_beyond_cash_come_from_capital() {
    let pool = setup_test_db().await;
    insert_barang(&pool, "BRG001", "Kas Toko", 1).await;
    insert_pembelian(&pool, "PB001", "2025-07-02", "BRG001", 1, 10_000).await;
    insert_pemodal(&pool, "PM001", "2025-07-01", 200_000).await;
    insert_pengeluaran(&pool, "OUT001", "2025-07-10", 25_000).await;

    let laporan = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    // Cash-token match is case-insensitive on the item name.
    assert_eq!(laporan.kas_manual, 10_000);
    assert_eq!(laporan.pengeluaran_dari_kas, 10_000);
    assert_eq!(laporan.pengeluaran_dari_pemodal, 15_000);
    assert_eq!(laporan.modal_belanja, 185_000);
}

#[tokio::test]
async fn valuation_uses_latest_price_on_or_before_period_end() {
    let pool = setup_test_db().await;
    insert_barang(&pool, "BRG001", "Beras", 10).await;
    insert_pembelian(&pool, "PB001", "2025-06-10", "BRG001", 10, 100).await;
    insert_pembelian(&pool, "PB002", "2025-07-20", "BRG001", 10, 120).await;
    insert_pembelian(&pool, "PB003", "2025-08-02", "BRG001", 10, 999).await;

    let june = monthly_report(&pool, 6, 2025, "KAS").await.unwrap();
    assert_eq!(june.total_nilai_barang, 10 * 100);

    // July sees the mid-July repricing but not the August lot.
    let july = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    assert_eq!(july.total_nilai_barang, 10 * 120);
}

#[tokio::test]
async fn items_without_purchase_history_are_valued_at_zero() {
    let pool = setup_test_db().await;
    insert_barang(&pool, "BRG001", "Beras", 10).await;

    let laporan = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    assert_eq!(laporan.total_nilai_barang, 0);
}

#[tokio::test]
async fn daily_breakdown_is_summed_and_sorted() {
    let pool = setup_test_db().await;
    insert_penjualan_line(&pool, "PJ001", "2025-07-05", 100, 10).await;
    insert_penjualan_line(&pool, "PJ002", "2025-07-02", 50, 5).await;
    insert_penjualan_line(&pool, "PJ003", "2025-07-05", 30, 3).await;

    let laporan = monthly_report(&pool, 7, 2025, "KAS").await.unwrap();
    assert_eq!(laporan.total_penjualan, 180);
    assert_eq!(laporan.total_laba, 18);

    assert_eq!(laporan.ringkasan_harian.len(), 2);
    assert_eq!(laporan.ringkasan_harian[0].tanggal.to_string(), "2025-07-02");
    assert_eq!(laporan.ringkasan_harian[0].penjualan, 50);
    assert_eq!(laporan.ringkasan_harian[0].laba, 5);
    assert_eq!(laporan.ringkasan_harian[1].tanggal.to_string(), "2025-07-05");
    assert_eq!(laporan.ringkasan_harian[1].penjualan, 130);
    assert_eq!(laporan.ringkasan_harian[1].laba, 13);

    // 18 profit: 5 + 6 + 7.
    assert_eq!(laporan.bagian_kamu, 5);
    assert_eq!(laporan.bagian_kas, 6);
    assert_eq!(laporan.bagian_pemodal, 7);
}
