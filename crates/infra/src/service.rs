//! Inventory service: the application-level entrypoint for queries and mutations.
//!
//! ```text
//! raw input
//!   ↓
//! 1. Validate into a domain command (no IO)
//!   ↓
//! 2. Store runs lookup + domain checks + writes as one atomic unit
//!   ↓
//! 3. Return the updated record
//! ```
//!
//! Derived views (dashboard totals, filters, warehouse list) are computed from a
//! fresh product listing on every call.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use stockboard_core::WarehouseTag;
use stockboard_inventory::{
    DashboardSummary, KpiPoint, KpiRange, Product, ProductFilter, TransferStock, UpdateDemand,
    distinct_warehouses, synthetic_series,
};

use crate::config::AppConfig;
use crate::error::InventoryResult;
use crate::seed;
use crate::store::{InMemoryProductStore, PostgresProductStore, ProductStore};

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn ProductStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Pick the backend from configuration, prepare it, and optionally seed it.
    pub async fn from_config(config: &AppConfig) -> InventoryResult<Self> {
        let store: Arc<dyn ProductStore> = match &config.database_url {
            Some(url) => {
                let pg = PostgresProductStore::connect(url).await?;
                pg.migrate().await?;
                info!("using postgres product store");
                Arc::new(pg)
            }
            None => {
                info!("DATABASE_URL not set; using in-memory product store");
                Arc::new(InMemoryProductStore::new())
            }
        };

        if config.seed {
            seed::seed_if_empty(store.as_ref()).await?;
        }

        Ok(Self::new(store))
    }

    pub fn store(&self) -> &Arc<dyn ProductStore> {
        &self.store
    }

    #[instrument(skip(self))]
    pub async fn products(&self) -> InventoryResult<Vec<Product>> {
        let products = self.store.list().await?;
        debug!(count = products.len(), "listed products");
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn search(&self, filter: &ProductFilter) -> InventoryResult<Vec<Product>> {
        let products = self.store.list().await?;
        Ok(filter.apply(&products))
    }

    pub async fn warehouses(&self) -> InventoryResult<Vec<WarehouseTag>> {
        let products = self.store.list().await?;
        Ok(distinct_warehouses(&products))
    }

    pub async fn dashboard(&self) -> InventoryResult<DashboardSummary> {
        let products = self.store.list().await?;
        Ok(DashboardSummary::from_products(&products))
    }

    /// Synthetic KPI series for a range label, ending today (UTC).
    pub fn kpis(&self, range: &str) -> Vec<KpiPoint> {
        self.kpis_at(range, Utc::now().date_naive(), &mut rand::thread_rng())
    }

    pub fn kpis_at<R: Rng>(&self, range: &str, today: NaiveDate, rng: &mut R) -> Vec<KpiPoint> {
        let range = KpiRange::parse_or_default(range);
        debug!(range = range.label(), "generating kpi series");
        synthetic_series(range, today, rng)
    }

    #[instrument(skip(self))]
    pub async fn update_demand(&self, id: &str, demand: i64) -> InventoryResult<Product> {
        let cmd = UpdateDemand::new(id, demand)
            .inspect_err(|e| warn!(error = %e, "rejected demand update"))?;

        match self.store.update_demand(&cmd).await {
            Ok(product) => {
                info!(
                    product_id = %cmd.product_id,
                    demand = cmd.demand,
                    status = %product.status(),
                    "demand updated"
                );
                Ok(product)
            }
            Err(e) => {
                warn!(product_id = %cmd.product_id, error = %e, "demand update failed");
                Err(e)
            }
        }
    }

    /// Move stock between warehouses; returns the debited source record.
    #[instrument(skip(self))]
    pub async fn transfer_stock(
        &self,
        id: &str,
        from: &str,
        to: &str,
        qty: i64,
    ) -> InventoryResult<Product> {
        let cmd = TransferStock::new(id, from, to, qty)
            .inspect_err(|e| warn!(error = %e, "rejected transfer"))?;

        match self.store.transfer(&cmd).await {
            Ok(plan) => {
                info!(
                    product_id = %cmd.product_id,
                    from = %cmd.from,
                    to = %cmd.to,
                    qty = cmd.quantity,
                    destination_created = plan.destination_created,
                    "stock transferred"
                );
                Ok(plan.source)
            }
            Err(e) => {
                warn!(product_id = %cmd.product_id, error = %e, "transfer failed");
                Err(e)
            }
        }
    }
}
