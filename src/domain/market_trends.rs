use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPrice {
    pub month: &'static str,
    pub price: f64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCorrelation {
    pub feature: &'static str,
    pub correlation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrends {
    pub price_history: Vec<MonthlyPrice>,
    pub feature_correlations: Vec<FeatureCorrelation>,
}
