//! Prefixed sequential ids ("BRG007", "PJ014", ...).
//!
//! Each table keys on a string id with a fixed prefix and a zero-padded
//! numeric suffix. The next id is max-of-existing-suffixes + 1, not row
//! count + 1, so deleted ids are never reused for a different entity.
//! There is no reservation step: two writers generating ids for the same
//! table at the same time can collide. The app assumes a single operator.

use sqlx::SqlitePool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    Barang,
    Pembelian,
    Penjualan,
    Pelanggan,
    Pengeluaran,
    Pemodal,
}

impl Entity {
    pub fn prefix(&self) -> &'static str {
        match self {
            Entity::Barang => "BRG",
            Entity::Pembelian => "PB",
            Entity::Penjualan => "PJ",
            Entity::Pelanggan => "PL",
            Entity::Pengeluaran => "OUT",
            Entity::Pemodal => "PM",
        }
    }

    // One fixed statement per table; identifiers are never built from
    // runtime strings.
    fn id_query(&self) -> &'static str {
        match self {
            Entity::Barang => "SELECT id_barang FROM barang WHERE id_barang LIKE 'BRG%'",
            Entity::Pembelian => {
                "SELECT id_pembelian FROM pembelian WHERE id_pembelian LIKE 'PB%'"
            }
            Entity::Penjualan => {
                "SELECT DISTINCT id_penjualan FROM penjualan WHERE id_penjualan LIKE 'PJ%'"
            }
            Entity::Pelanggan => {
                "SELECT id_pelanggan FROM pelanggan WHERE id_pelanggan LIKE 'PL%'"
            }
            Entity::Pengeluaran => {
                "SELECT id_pengeluaran FROM pengeluaran WHERE id_pengeluaran LIKE 'OUT%'"
            }
            Entity::Pemodal => "SELECT id_pemodal FROM pemodal WHERE id_pemodal LIKE 'PM%'",
        }
    }
}

/// Next id in the sequence given the ids already present. Ids whose suffix
/// is not numeric are skipped.
pub fn next_in_sequence(prefix: &str, existing: &[String]) -> String {
    let max = existing
        .iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:03}", prefix, max + 1)
}

pub async fn next_id(pool: &SqlitePool, entity: Entity) -> Result<String, sqlx::Error> {
    let existing: Vec<String> = sqlx::query_scalar(entity.id_query()).fetch_all(pool).await?;
    Ok(next_in_sequence(entity.prefix(), &existing))
}
