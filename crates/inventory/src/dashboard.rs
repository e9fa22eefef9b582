//! Aggregate KPIs shown on the dashboard cards.

use crate::product::Product;

/// Totals over a product list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSummary {
    pub total_stock: u64,
    pub total_demand: u64,
    /// Sum of `min(stock, demand)` per record.
    pub filled_demand: u64,
    /// Percentage of total demand covered by stock, in `[0, 100]`.
    /// Zero when there is no demand at all.
    pub fill_rate: f64,
}

impl DashboardSummary {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let (total_stock, total_demand, filled_demand) = products.into_iter().fold(
            (0u64, 0u64, 0u64),
            |(stock, demand, filled), p| {
                (
                    stock + u64::from(p.stock()),
                    demand + u64::from(p.demand()),
                    filled + u64::from(p.filled_demand()),
                )
            },
        );

        let fill_rate = if total_demand > 0 {
            filled_demand as f64 / total_demand as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_stock,
            total_demand,
            filled_demand,
            fill_rate,
        }
    }

    /// Fill rate rounded to two decimals with a percent sign, e.g. `"85.00%"`.
    pub fn fill_rate_display(&self) -> String {
        format!("{:.2}%", self.fill_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockboard_core::{ProductId, WarehouseTag};

    fn product(n: usize, stock: u32, demand: u32) -> Product {
        Product::new(
            ProductId::parse(format!("P-{n}")).unwrap(),
            "Widget",
            format!("SKU-{n}"),
            WarehouseTag::parse("Warehouse A").unwrap(),
            stock,
            demand,
        )
        .unwrap()
    }

    #[test]
    fn worked_example_gives_85_percent() {
        let products = vec![product(1, 180, 120), product(2, 50, 80)];
        let summary = DashboardSummary::from_products(&products);

        assert_eq!(summary.total_stock, 230);
        assert_eq!(summary.total_demand, 200);
        assert_eq!(summary.filled_demand, 170);
        assert_eq!(summary.fill_rate_display(), "85.00%");
    }

    #[test]
    fn empty_list_has_zero_fill_rate() {
        let summary = DashboardSummary::from_products(&Vec::<Product>::new());
        assert_eq!(summary.total_stock, 0);
        assert_eq!(summary.fill_rate, 0.0);
        assert_eq!(summary.fill_rate_display(), "0.00%");
    }

    #[test]
    fn zero_total_demand_has_zero_fill_rate() {
        let products = vec![product(1, 10, 0), product(2, 0, 0)];
        let summary = DashboardSummary::from_products(&products);
        assert_eq!(summary.total_stock, 10);
        assert_eq!(summary.fill_rate, 0.0);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn products() -> impl Strategy<Value = Vec<(u32, u32)>> {
            prop::collection::vec((0u32..10_000, 0u32..10_000), 0..40)
        }

        proptest! {
            /// Property: records without demand never contribute filled demand.
            #[test]
            fn zero_demand_contributes_nothing(pairs in products(), extra_stock in 0u32..10_000) {
                let mut list: Vec<Product> = pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, d))| product(i, *s, *d))
                    .collect();
                let base = DashboardSummary::from_products(&list);
                list.push(product(list.len(), extra_stock, 0));
                let with_extra = DashboardSummary::from_products(&list);

                prop_assert_eq!(base.filled_demand, with_extra.filled_demand);
                prop_assert_eq!(base.total_demand, with_extra.total_demand);
            }

            /// Property: when every record covers its demand, fill rate is 100%.
            #[test]
            fn covered_demand_fills_completely(pairs in products()) {
                let list: Vec<Product> = pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, d))| product(i, s.saturating_add(*d), *d))
                    .collect();
                let summary = DashboardSummary::from_products(&list);

                if summary.total_demand > 0 {
                    prop_assert_eq!(summary.fill_rate_display(), "100.00%");
                } else {
                    prop_assert_eq!(summary.fill_rate, 0.0);
                }
            }

            /// Property: fill rate stays within [0, 100].
            #[test]
            fn fill_rate_is_bounded(pairs in products()) {
                let list: Vec<Product> = pairs
                    .iter()
                    .enumerate()
                    .map(|(i, (s, d))| product(i, *s, *d))
                    .collect();
                let summary = DashboardSummary::from_products(&list);
                prop_assert!((0.0..=100.0).contains(&summary.fill_rate));
                prop_assert!(summary.filled_demand <= summary.total_demand);
            }
        }
    }
}
