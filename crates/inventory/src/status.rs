/// Stock health of a single product record, derived from stock vs demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    /// Stock exceeds demand.
    Healthy,
    /// Stock exactly covers demand.
    Low,
    /// Stock falls short of demand.
    Critical,
}

impl StockStatus {
    pub fn classify(stock: u32, demand: u32) -> Self {
        match stock.cmp(&demand) {
            core::cmp::Ordering::Greater => StockStatus::Healthy,
            core::cmp::Ordering::Equal => StockStatus::Low,
            core::cmp::Ordering::Less => StockStatus::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Healthy => "Healthy",
            StockStatus::Low => "Low",
            StockStatus::Critical => "Critical",
        }
    }
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_dashboard_badges() {
        assert_eq!(StockStatus::classify(100, 100), StockStatus::Low);
        assert_eq!(StockStatus::classify(120, 100), StockStatus::Healthy);
        assert_eq!(StockStatus::classify(80, 100), StockStatus::Critical);
    }

    #[test]
    fn zero_stock_and_zero_demand_is_low() {
        assert_eq!(StockStatus::classify(0, 0), StockStatus::Low);
    }
}
