pub mod barang;
pub mod laporan;
pub mod pelanggan;
pub mod pembelian;
pub mod pemodal;
pub mod pengeluaran;
pub mod penjualan;

pub use barang::{
    list_barang, save_barang, BarangListResponse, SaveBarangRequest, SaveBarangResponse,
};
pub use laporan::get_laporan;
pub use pelanggan::{
    list_pelanggan, save_pelanggan, PelangganListResponse, SavePelangganRequest,
    SavePelangganResponse,
};
pub use pembelian::{
    list_pembelian, save_pembelian, PembelianListResponse, SavePembelianRequest,
    SavePembelianResponse,
};
pub use pemodal::{
    list_pemodal, save_pemodal, PemodalListResponse, SavePemodalRequest, SavePemodalResponse,
};
pub use pengeluaran::{
    list_pengeluaran, save_pengeluaran, PengeluaranListResponse, SavePengeluaranRequest,
    SavePengeluaranResponse,
};
pub use penjualan::{
    get_penjualan, list_penjualan, sale_form, save_penjualan, NotaResponse, SaleFormResponse,
    SavePenjualanRequest, SavePenjualanResponse, TransaksiSummary,
};
