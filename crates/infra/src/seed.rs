//! Demo catalogue loaded into an empty store at startup.

use tracing::info;

use stockboard_core::{ProductId, WarehouseTag};
use stockboard_inventory::Product;

use crate::error::InventoryResult;
use crate::store::ProductStore;

// (id, name, sku, warehouse, stock, demand)
const CATALOGUE: &[(&str, &str, &str, &str, u32, u32)] = &[
    ("P-1001", "12-Pack Pencils", "PEN-12", "Warehouse A", 180, 120),
    ("P-1002", "Steel Bolts M8", "BOLT-M8", "Warehouse B", 50, 80),
    ("P-1003", "Copy Paper A4", "PAPER-A4", "Warehouse A", 400, 400),
    ("P-1004", "Packing Tape", "TAPE-48", "Warehouse C", 75, 20),
    ("P-1005", "Safety Gloves", "GLOVE-L", "Warehouse B", 30, 95),
    ("P-1006", "12-Pack Pencils", "PEN-12", "Warehouse B", 60, 60),
    ("P-1007", "Cordless Drill", "DRILL-18V", "Warehouse C", 12, 15),
    ("P-1008", "Copy Paper A4", "PAPER-A4", "Warehouse C", 220, 150),
];

pub fn demo_catalogue() -> InventoryResult<Vec<Product>> {
    CATALOGUE
        .iter()
        .map(|&(id, name, sku, warehouse, stock, demand)| -> InventoryResult<Product> {
            Ok(Product::new(
                ProductId::parse(id)?,
                name,
                sku,
                WarehouseTag::parse(warehouse)?,
                stock,
                demand,
            )?)
        })
        .collect()
}

/// Insert the demo catalogue when the store holds no records.
///
/// Returns the number of records inserted (0 when the store was not empty).
pub async fn seed_if_empty(store: &dyn ProductStore) -> InventoryResult<usize> {
    if !store.list().await?.is_empty() {
        return Ok(0);
    }

    let products = demo_catalogue()?;
    let count = products.len();
    for product in products {
        store.insert(product).await?;
    }

    info!(count, "seeded demo catalogue");
    Ok(count)
}
