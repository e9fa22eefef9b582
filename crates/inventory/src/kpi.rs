//! KPI time series for the dashboard chart.
//!
//! The series is synthetic demo data: values are drawn around fixed baselines and
//! are not derived from the product records. Keep the generator behind
//! [`synthetic_series`] so a historical source can replace it without touching
//! callers.

use chrono::{Duration, NaiveDate};
use rand::Rng;

const STOCK_BASELINE: i64 = 15_000;
const STOCK_SPREAD: i64 = 1_000;
const DEMAND_BASELINE: i64 = 12_500;
const DEMAND_SPREAD: i64 = 750;

/// Chart window selectable in the top bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KpiRange {
    Last7Days,
    Last14Days,
    #[default]
    Last30Days,
}

impl KpiRange {
    /// Parse the range label (`"7d"`, `"14d"`, `"30d"`).
    ///
    /// Unrecognized labels fall back to 30 days.
    pub fn parse_or_default(label: &str) -> Self {
        match label.trim() {
            "7d" => KpiRange::Last7Days,
            "14d" => KpiRange::Last14Days,
            _ => KpiRange::Last30Days,
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            KpiRange::Last7Days => 7,
            KpiRange::Last14Days => 14,
            KpiRange::Last30Days => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KpiRange::Last7Days => "7d",
            KpiRange::Last14Days => "14d",
            KpiRange::Last30Days => "30d",
        }
    }
}

/// One point of the stock/demand chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiPoint {
    pub date: NaiveDate,
    pub stock: u32,
    pub demand: u32,
}

impl KpiPoint {
    /// Date as `YYYY-MM-DD`.
    pub fn date_label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// One point per day of `range`, oldest first, the last one dated `today`.
pub fn synthetic_series<R: Rng>(range: KpiRange, today: NaiveDate, rng: &mut R) -> Vec<KpiPoint> {
    (0..i64::from(range.days()))
        .rev()
        .map(|back| KpiPoint {
            date: today - Duration::days(back),
            stock: jitter(rng, STOCK_BASELINE, STOCK_SPREAD),
            demand: jitter(rng, DEMAND_BASELINE, DEMAND_SPREAD),
        })
        .collect()
}

// Baselines exceed their spreads, so the result is always positive.
fn jitter<R: Rng>(rng: &mut R, baseline: i64, spread: i64) -> u32 {
    (baseline + rng.gen_range(-spread..spread)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn range_labels_map_to_days() {
        assert_eq!(KpiRange::parse_or_default("7d").days(), 7);
        assert_eq!(KpiRange::parse_or_default("14d").days(), 14);
        assert_eq!(KpiRange::parse_or_default("30d").days(), 30);
    }

    #[test]
    fn unknown_range_falls_back_to_thirty_days() {
        assert_eq!(KpiRange::parse_or_default("90d"), KpiRange::Last30Days);
        assert_eq!(KpiRange::parse_or_default(""), KpiRange::Last30Days);
    }

    #[test]
    fn series_ends_today_and_is_oldest_first() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = synthetic_series(KpiRange::Last7Days, today(), &mut rng);

        assert_eq!(points.len(), 7);
        assert_eq!(points.last().unwrap().date, today());
        assert_eq!(points[0].date_label(), "2024-02-28");
        assert!(points.windows(2).all(|w| w[0].date + Duration::days(1) == w[1].date));
    }

    #[test]
    fn values_stay_within_baseline_spread() {
        let mut rng = StdRng::seed_from_u64(42);
        for p in synthetic_series(KpiRange::Last30Days, today(), &mut rng) {
            assert!((14_000..16_000).contains(&p.stock));
            assert!((11_750..13_250).contains(&p.demand));
        }
    }

    #[test]
    fn series_crosses_month_boundaries() {
        let mut rng = StdRng::seed_from_u64(1);
        let points = synthetic_series(KpiRange::Last14Days, today(), &mut rng);
        assert_eq!(points[0].date_label(), "2024-02-21");
    }
}
