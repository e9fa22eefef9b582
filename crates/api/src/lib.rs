//! HTTP API: GraphQL schema, Axum routing, and error mapping.

pub mod app;
pub mod middleware;
