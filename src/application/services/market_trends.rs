use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::application::ports::RandomSource;
use crate::domain::{FeatureCorrelation, MarketTrends, MonthlyPrice};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const FEATURE_CORRELATIONS: [(&str, f64); 5] = [
    ("Income", 0.42),
    ("Rooms", 0.28),
    ("Population", 0.18),
    ("Age", -0.12),
    ("Location", 0.08),
];

/// Synthetic monthly price series for the dashboard charts.
pub struct MarketTrendsService {
    random: Arc<dyn RandomSource>,
}

impl MarketTrendsService {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn current(&self) -> MarketTrends {
        self.for_year(Utc::now().year())
    }

    pub fn for_year(&self, year: i32) -> MarketTrends {
        let price_history = MONTHS
            .into_iter()
            .enumerate()
            .map(|(index, month)| {
                let noise = self.random.next_unit().clamp(0.0, 1.0) * 50_000.0 - 25_000.0;
                MonthlyPrice {
                    month,
                    price: 1_200_000.0 + index as f64 * 15_000.0 + noise,
                    date: format!("{}-{:02}-01", year, index + 1),
                }
            })
            .collect();

        let feature_correlations = FEATURE_CORRELATIONS
            .into_iter()
            .map(|(feature, correlation)| FeatureCorrelation {
                feature,
                correlation,
            })
            .collect();

        MarketTrends {
            price_history,
            feature_correlations,
        }
    }
}
