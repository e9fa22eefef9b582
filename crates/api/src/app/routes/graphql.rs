use axum::{
    Json,
    extract::Extension,
    response::{Html, IntoResponse},
};

use crate::app::schema::StockboardSchema;

/// Execute one GraphQL operation.
///
/// Resolver failures travel in the response's `errors` array with HTTP 200;
/// only malformed request bodies are rejected by the JSON extractor.
pub async fn execute(
    Extension(schema): Extension<StockboardSchema>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(schema.execute(request).await)
}

pub async fn graphiql() -> impl IntoResponse {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}
