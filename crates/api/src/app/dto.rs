//! GraphQL object and input types, and their mapping to/from domain types.

use async_graphql::{Enum, ID, InputObject, SimpleObject};

use stockboard_core::Entity;
use stockboard_inventory::{DashboardSummary, KpiPoint, Product, ProductFilter, StockStatus};

use crate::app::errors;

// -------------------------
// Output types
// -------------------------

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductDto {
    pub id: ID,
    pub name: String,
    pub sku: String,
    pub warehouse: String,
    pub stock: u32,
    pub demand: u32,
    pub status: StockStatusDto,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: ID(p.id().to_string()),
            name: p.name().to_string(),
            sku: p.sku().to_string(),
            warehouse: p.warehouse().to_string(),
            stock: p.stock(),
            demand: p.demand(),
            status: p.status().into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
#[graphql(name = "StockStatus")]
pub enum StockStatusDto {
    Healthy,
    Low,
    Critical,
}

impl From<StockStatus> for StockStatusDto {
    fn from(s: StockStatus) -> Self {
        match s {
            StockStatus::Healthy => StockStatusDto::Healthy,
            StockStatus::Low => StockStatusDto::Low,
            StockStatus::Critical => StockStatusDto::Critical,
        }
    }
}

impl From<StockStatusDto> for StockStatus {
    fn from(s: StockStatusDto) -> Self {
        match s {
            StockStatusDto::Healthy => StockStatus::Healthy,
            StockStatusDto::Low => StockStatus::Low,
            StockStatusDto::Critical => StockStatus::Critical,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "KPI")]
pub struct KpiDto {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub stock: u32,
    pub demand: u32,
}

impl From<KpiPoint> for KpiDto {
    fn from(p: KpiPoint) -> Self {
        Self {
            date: p.date_label(),
            stock: p.stock,
            demand: p.demand,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "DashboardSummary")]
pub struct DashboardDto {
    pub total_stock: i32,
    pub total_demand: i32,
    pub filled_demand: i32,
    /// Percentage in `[0, 100]`.
    pub fill_rate: f64,
    /// Fill rate with two decimals and a percent sign, e.g. `85.00%`.
    pub fill_rate_display: String,
}

impl TryFrom<DashboardSummary> for DashboardDto {
    type Error = async_graphql::Error;

    /// Totals are GraphQL `Int` (32-bit); a sum past `i32::MAX` is an error,
    /// never a silently out-of-range value.
    fn try_from(s: DashboardSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            total_stock: graphql_int("totalStock", s.total_stock)?,
            total_demand: graphql_int("totalDemand", s.total_demand)?,
            filled_demand: graphql_int("filledDemand", s.filled_demand)?,
            fill_rate: s.fill_rate,
            fill_rate_display: s.fill_rate_display(),
        })
    }
}

fn graphql_int(field: &'static str, value: u64) -> async_graphql::Result<i32> {
    i32::try_from(value).map_err(|_| errors::int_out_of_range(field, value))
}

// -------------------------
// Input types
// -------------------------

#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "ProductFilterInput")]
pub struct ProductFilterInput {
    pub search: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<StockStatusDto>,
}

impl From<ProductFilterInput> for ProductFilter {
    fn from(input: ProductFilterInput) -> Self {
        Self {
            search: input.search,
            warehouse: input.warehouse,
            status: input.status.map(Into::into),
        }
    }
}
