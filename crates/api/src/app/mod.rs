//! HTTP API application wiring (Axum router + GraphQL schema).
//!
//! - `schema.rs`: GraphQL query/mutation roots over `InventoryService`
//! - `routes/`: HTTP handlers (`/graphql`, `/health`)
//! - `dto.rs`: GraphQL object/input types and domain mapping
//! - `errors.rs`: GraphQL error codes and JSON error responses

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockboard_infra::{AppConfig, InventoryResult, InventoryService};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod schema;

/// Router over an already-built service.
pub fn router(service: InventoryService) -> Router {
    let schema = schema::build_schema(service);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(schema)),
        )
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: &AppConfig) -> InventoryResult<Router> {
    let service = InventoryService::from_config(config).await?;
    Ok(router(service))
}
