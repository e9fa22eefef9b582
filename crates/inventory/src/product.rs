use stockboard_core::{DomainError, DomainResult, Entity, ProductId, WarehouseTag};

use crate::status::StockStatus;

/// A product record: one sku stocked in one warehouse.
///
/// The same sku may appear as several records, one per warehouse. Stock and
/// demand are independently non-negative, which `u32` enforces by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    warehouse: WarehouseTag,
    stock: u32,
    demand: u32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        sku: impl Into<String>,
        warehouse: WarehouseTag,
        stock: u32,
        demand: u32,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        if sku.trim().is_empty() {
            return Err(DomainError::validation("sku cannot be empty"));
        }
        Ok(Self {
            id,
            name: name.into(),
            sku,
            warehouse,
            stock,
            demand,
        })
    }

    pub fn id_typed(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn warehouse(&self) -> &WarehouseTag {
        &self.warehouse
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn demand(&self) -> u32 {
        self.demand
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::classify(self.stock, self.demand)
    }

    /// Units of demand this record can cover (`min(stock, demand)`).
    pub fn filled_demand(&self) -> u32 {
        self.stock.min(self.demand)
    }

    /// Apply a demand update, returning the updated record.
    pub fn with_demand(&self, cmd: &UpdateDemand) -> DomainResult<Self> {
        if &cmd.product_id != self.id_typed() {
            return Err(DomainError::invalid_state("product_id mismatch"));
        }
        Ok(Self {
            demand: cmd.demand,
            ..self.clone()
        })
    }

    pub(crate) fn with_stock(&self, stock: u32) -> Self {
        Self {
            stock,
            ..self.clone()
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Command: set the demand figure of one product record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDemand {
    pub product_id: ProductId,
    pub demand: u32,
}

impl UpdateDemand {
    /// Validate raw input. Demand must fit the non-negative invariant.
    pub fn new(product_id: &str, demand: i64) -> DomainResult<Self> {
        let product_id = ProductId::parse(product_id)?;
        if demand < 0 {
            return Err(DomainError::validation("demand cannot be negative"));
        }
        let demand = u32::try_from(demand)
            .map_err(|_| DomainError::validation("demand is too large"))?;
        Ok(Self { product_id, demand })
    }
}
