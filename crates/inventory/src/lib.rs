//! Inventory domain module.
//!
//! This crate contains business rules for the stock dashboard, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage). Stores load the
//! records, call into these rules, and persist whatever they return.

pub mod dashboard;
pub mod filter;
pub mod kpi;
pub mod product;
pub mod status;
pub mod transfer;

pub use dashboard::DashboardSummary;
pub use filter::{ProductFilter, distinct_warehouses};
pub use kpi::{KpiPoint, KpiRange, synthetic_series};
pub use product::{Product, UpdateDemand};
pub use status::StockStatus;
pub use transfer::{DestinationSlot, TransferPlan, TransferStock, plan_transfer};
