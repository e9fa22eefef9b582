//! Infrastructure layer: product storage, configuration, seeding and the
//! inventory service that ties them to the domain rules.

pub mod config;
pub mod error;
pub mod seed;
pub mod service;
pub mod store;


pub use config::{AppConfig, ConfigError};
pub use error::{InventoryError, InventoryResult, StoreError};
pub use service::InventoryService;
pub use store::{InMemoryProductStore, PostgresProductStore, ProductStore};
