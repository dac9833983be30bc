use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::application::ports::RandomSource;
use crate::domain::{
    FeatureValidationError, Horizon, MarketFactors, PredictionResult, PropertyFeatures,
    YearProjection,
};

const BASE_ANNUAL_RATE: f64 = 0.03;
const CYCLE_AMPLITUDE: f64 = 0.01;
const MIN_PROJECTION_CONFIDENCE: f64 = 0.5;

/// Closed-form valuation: base price, three 0-100 scores and a yearly projection.
///
/// The only non-determinism is two draws from the injected [`RandomSource`]: one
/// perturbs the risk score by up to 10 points, the other spreads the overall
/// confidence over 0.85..0.95.
pub struct ScoringEngine {
    random: Arc<dyn RandomSource>,
}

impl ScoringEngine {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn score(
        &self,
        features: &PropertyFeatures,
        horizon: Horizon,
    ) -> Result<PredictionResult, FeatureValidationError> {
        self.score_from_year(features, horizon, Utc::now().year())
    }

    /// Same as [`score`](Self::score) with projections counted from `base_year`.
    pub fn score_from_year(
        &self,
        features: &PropertyFeatures,
        horizon: Horizon,
        base_year: i32,
    ) -> Result<PredictionResult, FeatureValidationError> {
        features.check()?;

        let price = base_price(features);
        let investment = investment_score(features);
        let appreciation = appreciation_potential(features);
        let risk = risk_score(features, self.draw());
        let projections = project_prices(price, investment, horizon, base_year);
        let confidence = 0.85 + 0.10 * self.draw();

        Ok(PredictionResult {
            predicted_price: price.round(),
            confidence,
            investment_score: investment.round(),
            appreciation_potential: appreciation.round(),
            risk_score: risk.round(),
            projections,
        })
    }

    fn draw(&self) -> f64 {
        self.random.next_unit().clamp(0.0, 1.0)
    }
}

pub fn base_price(features: &PropertyFeatures) -> f64 {
    let [income, age, rooms, bedrooms, population] = features.as_array();

    50_000.0
        + income * 12.0
        + (50.0 - age).max(0.0) * 2_000.0
        + rooms * 15_000.0
        + bedrooms * 25_000.0
        + (population / 1_000.0).min(500.0) * 100.0
}

pub fn investment_score(features: &PropertyFeatures) -> f64 {
    let [income, age, rooms, bedrooms, population] = features.as_array();

    let income_term = (income / 50_000.0 * 40.0).min(40.0);
    let age_term = if age < 15.0 {
        25.0
    } else if age < 30.0 {
        20.0
    } else {
        15.0
    };
    let room_term = ((rooms + bedrooms) * 3.0).min(20.0);
    let population_term = if population < 50_000.0 {
        15.0
    } else if population < 200_000.0 {
        20.0
    } else {
        15.0
    };

    (income_term + age_term + room_term + population_term).clamp(0.0, 100.0)
}

pub fn appreciation_potential(features: &PropertyFeatures) -> f64 {
    let [income, age, rooms, bedrooms, population] = features.as_array();

    let demand = (income / 40_000.0 * 25.0).min(30.0);
    let age_factor = ((50.0 - age) / 50.0 * 25.0).max(0.0);
    let space = ((rooms + bedrooms) * 2.5).min(25.0);
    let population_growth = (population / 100_000.0 * 20.0).min(20.0);

    (demand + age_factor + space + population_growth).clamp(0.0, 100.0)
}

/// Lower is better. `draw` in `[0, 1]` adds up to 10 points of market noise.
pub fn risk_score(features: &PropertyFeatures, draw: f64) -> f64 {
    let [income, age, _, _, population] = features.as_array();

    let income_risk = if income < 40_000.0 {
        25.0
    } else if income > 90_000.0 {
        10.0
    } else {
        15.0
    };
    let age_risk = if age > 40.0 {
        20.0
    } else if age < 10.0 {
        15.0
    } else {
        10.0
    };
    let population_risk = if population < 10_000.0 {
        20.0
    } else if population > 300_000.0 {
        15.0
    } else {
        10.0
    };

    (income_risk + age_risk + population_risk + draw * 10.0).clamp(0.0, 100.0)
}

pub fn project_prices(
    base_price: f64,
    investment_score: f64,
    horizon: Horizon,
    base_year: i32,
) -> Vec<YearProjection> {
    let annual_rate = BASE_ANNUAL_RATE + (investment_score - 50.0) / 1_000.0;

    (1..=horizon.years())
        .map(|step| {
            let i = f64::from(step);
            let cycle = CYCLE_AMPLITUDE * (i * 0.5).sin();
            let projected = base_price * (1.0 + annual_rate + cycle).powf(i);

            YearProjection {
                year: base_year + step as i32,
                projected_price: projected.round(),
                confidence_level: (0.95 - i * 0.04).max(MIN_PROJECTION_CONFIDENCE),
                market_factors: MarketFactors {
                    base_rate: round_to_cents(annual_rate * 100.0),
                    cycle_factor: round_to_cents(cycle * 100.0),
                },
            }
        })
        .collect()
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
