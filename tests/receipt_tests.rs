// Receipt text and rupiah formatting.

use chrono::NaiveDate;
use waserda_api::services::sales::RecordedLine;
use waserda_api::services::whatsapp::format_receipt;
use waserda_api::utils::currency::{format_rupiah, format_thousands};

#[test]
fn thousands_grouping_uses_dots() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1_000), "1.000");
    assert_eq!(format_thousands(1_234_567), "1.234.567");
    assert_eq!(format_thousands(-4_500), "-4.500");
}

#[test]
fn rupiah_prefix() {
    assert_eq!(format_rupiah(2_500), "Rp 2.500");
    assert_eq!(format_rupiah(0), "Rp 0");
}

#[test]
fn receipt_layout_matches_the_nota_format() {
    let tanggal: NaiveDate = "2025-07-10".parse().unwrap();
    let items = vec![
        RecordedLine {
            nama_barang: "Beras".to_string(),
            jumlah: 2,
            harga_jual: 15_000,
        },
        RecordedLine {
            nama_barang: "Gula".to_string(),
            jumlah: 1,
            harga_jual: 12_000,
        },
    ];

    let nota = format_receipt(tanggal, "Budi", "628123456", &items, 42_000, "lunas");
    let lines: Vec<&str> = nota.lines().collect();

    assert_eq!(lines[0], "🧾 *NOTA WASERDA*");
    assert_eq!(lines[1], "Tanggal: 2025-07-10");
    assert_eq!(lines[2], "Pelanggan: Budi (628123456)");
    assert_eq!(lines[3], "Catatan: lunas");
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "Daftar Belanja:");
    assert_eq!(lines[6], "- Beras x2 @15.000 = 30.000");
    assert_eq!(lines[7], "- Gula x1 @12.000 = 12.000");
    assert_eq!(lines[8], "");
    assert_eq!(lines[9], "Total: Rp42.000");
    assert_eq!(lines[10], "Terima kasih 🙏");
}
