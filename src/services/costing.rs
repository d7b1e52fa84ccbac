//! FIFO cost-of-goods-sold engine.
//!
//! The unit cost of a sale is the weighted average of the purchase lots it
//! consumes, oldest lot first. The walk is a pure function over the purchase
//! history; it never looks at `stok_akhir` and never mutates anything.

/// A purchase lot as seen by the FIFO walk: quantity bought and unit cost.
/// Lots must be ordered oldest first.
#[derive(Clone, Copy, Debug)]
pub struct Lot {
    pub jumlah: i64,
    pub harga_beli: i64,
}

/// Average unit cost for `jumlah_jual` units, rounded to the nearest rupiah.
///
/// If the history does not cover the full quantity, the uncovered units are
/// priced at zero and still divide into the average. That inflates profit on
/// oversell; callers that need stricter behavior must check stock first.
pub fn fifo_unit_cost(lots: &[Lot], jumlah_jual: i64) -> i64 {
    if jumlah_jual == 0 {
        return 0;
    }
    let mut total_hpp: i64 = 0;
    let mut sisa = jumlah_jual;
    for lot in lots {
        let ambil = sisa.min(lot.jumlah);
        total_hpp += ambil * lot.harga_beli;
        sisa -= ambil;
        if sisa == 0 {
            break;
        }
    }
    (total_hpp as f64 / jumlah_jual as f64).round() as i64
}
