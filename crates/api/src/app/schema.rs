//! GraphQL query and mutation roots.

use async_graphql::{Context, EmptySubscription, ID, Object, Schema};

use stockboard_infra::InventoryService;

use crate::app::dto::{DashboardDto, KpiDto, ProductDto, ProductFilterInput};
use crate::app::errors;

pub type StockboardSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(service: InventoryService) -> StockboardSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

fn service<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a InventoryService> {
    ctx.data::<InventoryService>()
        .map_err(|_| errors::internal_error("inventory service not configured"))
}

#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All product records, ordered by id.
    async fn products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProductDto>> {
        let products = service(ctx)?
            .products()
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    /// Stock/demand series for `7d`, `14d` or `30d` (anything else means 30 days).
    async fn kpis(&self, ctx: &Context<'_>, range: String) -> async_graphql::Result<Vec<KpiDto>> {
        let points = service(ctx)?.kpis(&range);
        Ok(points.into_iter().map(KpiDto::from).collect())
    }

    /// Distinct warehouse tags in first-seen order.
    async fn warehouses(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<String>> {
        let tags = service(ctx)?
            .warehouses()
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        Ok(tags.into_iter().map(String::from).collect())
    }

    /// Totals and fill rate over all products.
    async fn dashboard(&self, ctx: &Context<'_>) -> async_graphql::Result<DashboardDto> {
        let summary = service(ctx)?
            .dashboard()
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        DashboardDto::try_from(summary)
    }

    async fn search_products(
        &self,
        ctx: &Context<'_>,
        filter: ProductFilterInput,
    ) -> async_graphql::Result<Vec<ProductDto>> {
        let products = service(ctx)?
            .search(&filter.into())
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }
}

#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn update_demand(
        &self,
        ctx: &Context<'_>,
        id: ID,
        demand: i32,
    ) -> async_graphql::Result<ProductDto> {
        let product = service(ctx)?
            .update_demand(&id, i64::from(demand))
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        Ok(product.into())
    }

    /// Move `qty` units from the record `id` (stocked in `from`) to the same
    /// sku's record in `to`. Returns the debited source record.
    async fn transfer_stock(
        &self,
        ctx: &Context<'_>,
        id: ID,
        from: String,
        to: String,
        qty: i32,
    ) -> async_graphql::Result<ProductDto> {
        let product = service(ctx)?
            .transfer_stock(&id, &from, &to, i64::from(qty))
            .await
            .map_err(errors::inventory_error_to_graphql)?;
        Ok(product.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use stockboard_core::{ProductId, WarehouseTag};
    use stockboard_infra::InMemoryProductStore;
    use stockboard_inventory::Product;

    fn schema() -> StockboardSchema {
        let product = |id: &str, sku: &str, wh: &str, stock, demand| {
            Product::new(
                ProductId::parse(id).unwrap(),
                "Widget",
                sku,
                WarehouseTag::parse(wh).unwrap(),
                stock,
                demand,
            )
            .unwrap()
        };
        let store = InMemoryProductStore::with_products([
            product("P-1", "SKU-1", "Warehouse A", 180, 120),
            product("P-2", "SKU-2", "Warehouse B", 50, 80),
        ]);
        build_schema(InventoryService::new(Arc::new(store)))
    }

    #[tokio::test]
    async fn dashboard_query_matches_worked_example() {
        let res = schema()
            .execute("{ dashboard { totalStock totalDemand filledDemand fillRateDisplay } }")
            .await;
        assert!(res.errors.is_empty(), "{:?}", res.errors);

        let data = res.data.into_json().unwrap();
        assert_eq!(data["dashboard"]["totalStock"], 230);
        assert_eq!(data["dashboard"]["totalDemand"], 200);
        assert_eq!(data["dashboard"]["filledDemand"], 170);
        assert_eq!(data["dashboard"]["fillRateDisplay"], "85.00%");
    }

    #[tokio::test]
    async fn products_expose_status_enum() {
        let res = schema().execute("{ products { id status } }").await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["products"][0]["status"], "HEALTHY");
        assert_eq!(data["products"][1]["status"], "CRITICAL");
    }

    #[tokio::test]
    async fn transfer_error_surfaces_code() {
        let res = schema()
            .execute(
                r#"mutation { transferStock(id: "P-2", from: "Warehouse B", to: "Warehouse A", qty: 51) { id } }"#,
            )
            .await;
        assert_eq!(res.errors.len(), 1);
        let ext = res.errors[0].extensions.as_ref().unwrap();
        assert_eq!(
            ext.get("code"),
            Some(&async_graphql::Value::from("INSUFFICIENT_STOCK"))
        );
    }

    #[tokio::test]
    async fn dashboard_total_past_int_range_is_an_error() {
        let schema = schema();
        for id in ["P-1", "P-2"] {
            let res = schema
                .execute(format!(
                    r#"mutation {{ updateDemand(id: "{id}", demand: 2147483647) {{ id }} }}"#
                ))
                .await;
            assert!(res.errors.is_empty(), "{:?}", res.errors);
        }

        let res = schema.execute("{ dashboard { totalDemand } }").await;
        assert_eq!(res.errors.len(), 1);
        let ext = res.errors[0].extensions.as_ref().unwrap();
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from("INVALID_STATE")));
        assert_eq!(res.data, async_graphql::Value::Null);
    }

    #[tokio::test]
    async fn search_products_filters_by_status() {
        let res = schema()
            .execute(r#"{ searchProducts(filter: { status: CRITICAL }) { id } }"#)
            .await;
        let data = res.data.into_json().unwrap();
        assert_eq!(data["searchProducts"].as_array().unwrap().len(), 1);
        assert_eq!(data["searchProducts"][0]["id"], "P-2");
    }
}
