use axum::{Router, routing::get};

pub mod graphql;
pub mod system;

/// Router for the GraphQL endpoint (POST for operations, GET for GraphiQL).
pub fn router() -> Router {
    Router::new().route("/graphql", get(graphql::graphiql).post(graphql::execute))
}
