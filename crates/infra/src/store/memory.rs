use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::instrument;

use stockboard_core::{DomainError, Entity, ProductId, WarehouseTag};
use stockboard_inventory::{
    DestinationSlot, Product, TransferPlan, TransferStock, UpdateDemand, plan_transfer,
};

use crate::error::{InventoryResult, StoreError};
use crate::store::ProductStore;

/// In-memory product store for tests/dev.
///
/// A single `RwLock` guards the map; mutations hold the write lock for the
/// whole read-check-write sequence.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<BTreeMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let map = products
            .into_iter()
            .map(|p| (p.id().clone(), p))
            .collect();
        Self {
            inner: RwLock::new(map),
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("product map lock poisoned".to_string())
}

fn find_at<'a>(
    map: &'a BTreeMap<ProductId, Product>,
    sku: &str,
    warehouse: &WarehouseTag,
) -> Option<&'a Product> {
    map.values()
        .find(|p| p.sku() == sku && p.warehouse() == warehouse)
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }

    async fn get(&self, id: &ProductId) -> InventoryResult<Option<Product>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(id).cloned())
    }

    async fn insert(&self, product: Product) -> InventoryResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(product.id()) {
            return Err(DomainError::invalid_state(format!(
                "product {} already exists",
                product.id()
            ))
            .into());
        }
        if find_at(&map, product.sku(), product.warehouse()).is_some() {
            return Err(DomainError::invalid_state(format!(
                "sku {} already stocked in '{}'",
                product.sku(),
                product.warehouse()
            ))
            .into());
        }
        map.insert(product.id().clone(), product);
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %cmd.product_id))]
    async fn update_demand(&self, cmd: &UpdateDemand) -> InventoryResult<Product> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let current = map
            .get(&cmd.product_id)
            .ok_or_else(|| DomainError::not_found(cmd.product_id.as_str()))?;
        let updated = current.with_demand(cmd)?;
        map.insert(updated.id().clone(), updated.clone());
        Ok(updated)
    }

    #[instrument(skip(self), fields(product_id = %cmd.product_id, qty = cmd.quantity))]
    async fn transfer(&self, cmd: &TransferStock) -> InventoryResult<TransferPlan> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;

        let plan = {
            let source = map
                .get(&cmd.product_id)
                .ok_or_else(|| DomainError::not_found(cmd.product_id.as_str()))?;
            let destination_id = ProductId::for_transfer_destination(source.sku(), &cmd.to);
            let slot = DestinationSlot::resolve(
                find_at(&map, source.sku(), &cmd.to),
                map.get(&destination_id),
                source.sku(),
                &cmd.to,
            );
            plan_transfer(cmd, source, slot)?
        };

        map.insert(plan.source.id().clone(), plan.source.clone());
        map.insert(plan.destination.id().clone(), plan.destination.clone());
        Ok(plan)
    }
}
