//! Product storage abstractions.
//!
//! Every mutating operation runs as one atomic unit inside the backend: the
//! lookups, the domain checks and the writes either all take effect or none do.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

use stockboard_core::ProductId;
use stockboard_inventory::{Product, TransferPlan, TransferStock, UpdateDemand};

use crate::error::InventoryResult;

/// Store of product records keyed by [`ProductId`].
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    /// All records, ordered by id.
    async fn list(&self) -> InventoryResult<Vec<Product>>;

    async fn get(&self, id: &ProductId) -> InventoryResult<Option<Product>>;

    /// Insert a new record.
    ///
    /// Fails with `InvalidState` when the id or the (sku, warehouse) pair is
    /// already taken.
    async fn insert(&self, product: Product) -> InventoryResult<()>;

    /// Set the demand of one record and return it. Last write wins.
    async fn update_demand(&self, cmd: &UpdateDemand) -> InventoryResult<Product>;

    /// Apply a stock transfer atomically and return what was written.
    async fn transfer(&self, cmd: &TransferStock) -> InventoryResult<TransferPlan>;
}
