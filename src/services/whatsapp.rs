//! WhatsApp gateway client. Delivery is best effort: the sale is already
//! committed when the receipt goes out, so failures are logged and dropped,
//! never retried.

use anyhow::Context;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;

use crate::services::sales::RecordedLine;
use crate::utils::currency::format_thousands;

#[derive(Debug, Clone)]
pub struct WaClient {
    client: Client,
    endpoint: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    number: &'a str,
    message: &'a str,
}

impl WaClient {
    pub fn new(endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, endpoint }
    }

    pub async fn send(&self, number: &str, message: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendMessageRequest { number, message })
            .send()
            .await
            .context("Failed to reach WhatsApp gateway")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("WhatsApp gateway returned {}: {}", status, body);
        }

        Ok(())
    }
}

/// Receipt text for a recorded sale: header, customer, one line per item,
/// grand total, footer.
pub fn format_receipt(
    tanggal: NaiveDate,
    nama_pelanggan: &str,
    nomor_wa: &str,
    items: &[RecordedLine],
    total: i64,
    catatan: &str,
) -> String {
    let mut lines = vec![
        "🧾 *NOTA WASERDA*".to_string(),
        format!("Tanggal: {}", tanggal.format("%Y-%m-%d")),
        format!("Pelanggan: {} ({})", nama_pelanggan, nomor_wa),
        format!("Catatan: {}", catatan),
        String::new(),
        "Daftar Belanja:".to_string(),
    ];

    for item in items {
        let subtotal = item.jumlah * item.harga_jual;
        lines.push(format!(
            "- {} x{} @{} = {}",
            item.nama_barang,
            item.jumlah,
            format_thousands(item.harga_jual),
            format_thousands(subtotal)
        ));
    }

    lines.push(String::new());
    lines.push(format!("Total: Rp{}", format_thousands(total)));
    lines.push("Terima kasih 🙏".to_string());

    lines.join("\n")
}
