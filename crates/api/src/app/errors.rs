use async_graphql::ErrorExtensions;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockboard_infra::InventoryError;

/// Map a service error onto the GraphQL error channel.
///
/// The message is the error's display text; `extensions.code` carries the
/// stable code (`NOT_FOUND`, `INVALID_STATE`, `INSUFFICIENT_STOCK`,
/// `VALIDATION`, `STORE_FAILURE`).
pub fn inventory_error_to_graphql(err: InventoryError) -> async_graphql::Error {
    let code = err.code();
    async_graphql::Error::new(err.to_string()).extend_with(|_, ext| ext.set("code", code))
}

/// Error raised when the GraphQL context is missing the service (wiring bug).
pub fn internal_error(message: impl Into<String>) -> async_graphql::Error {
    async_graphql::Error::new(message.into()).extend_with(|_, ext| ext.set("code", "INTERNAL"))
}

/// A dashboard total no longer fits the 32-bit GraphQL `Int`.
pub fn int_out_of_range(field: &str, value: u64) -> async_graphql::Error {
    async_graphql::Error::new(format!(
        "{field} is {value}, beyond the GraphQL Int range (max {})",
        i32::MAX
    ))
    .extend_with(|_, ext| ext.set("code", "INVALID_STATE"))
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
