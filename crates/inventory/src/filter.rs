//! Product table filtering (search box, warehouse and status dropdowns).

use stockboard_core::WarehouseTag;

use crate::product::Product;
use crate::status::StockStatus;

/// Label the warehouse dropdown shows when nothing is selected.
pub const WAREHOUSE_PLACEHOLDER: &str = "Warehouses";

/// Filter over the product table. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring matched against id, name and sku.
    pub search: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<StockStatus>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_warehouse(product) && self.matches_status(product)
    }

    /// Matching records, in input order. The input is left untouched.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
        products
            .into_iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        [product.id_typed().as_str(), product.name(), product.sku()]
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }

    fn matches_warehouse(&self, product: &Product) -> bool {
        match self.warehouse.as_deref().map(str::trim) {
            None | Some("") | Some(WAREHOUSE_PLACEHOLDER) => true,
            Some(selected) => product.warehouse().as_str() == selected,
        }
    }

    fn matches_status(&self, product: &Product) -> bool {
        self.status.is_none_or(|s| product.status() == s)
    }
}

/// Distinct warehouse tags in first-seen order.
pub fn distinct_warehouses<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<WarehouseTag> {
    let mut seen: Vec<WarehouseTag> = Vec::new();
    for p in products {
        if !seen.contains(p.warehouse()) {
            seen.push(p.warehouse().clone());
        }
    }
    seen
}
