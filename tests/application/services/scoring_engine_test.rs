#[path = "../../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use scoutout::application::services::{
    ScoringEngine, appreciation_potential, base_price, investment_score, risk_score,
};
use scoutout::domain::{Horizon, PropertyFeatures};
use scoutout::infrastructure::random::{FixedRandom, SeededRandom};

use helpers::{sample_features, scoring_engine};

#[test]
fn given_reference_features_when_pricing_then_base_price_matches_formula() {
    let price = base_price(&sample_features());

    assert_eq!(price, 1_248_500.0);
}

#[test]
fn given_reference_features_when_scoring_three_years_then_projects_following_years() {
    let engine = scoring_engine(0.5);
    let horizon = Horizon::new(3).unwrap();

    let result = engine
        .score_from_year(&sample_features(), horizon, 2026)
        .unwrap();

    assert_eq!(result.predicted_price, 1_248_500.0);
    let years: Vec<i32> = result.projections.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2027, 2028, 2029]);
}

#[test]
fn given_fixed_draw_when_scoring_then_risk_and_confidence_are_deterministic() {
    let engine = scoring_engine(0.5);

    let result = engine
        .score(&sample_features(), Horizon::default())
        .unwrap();

    assert_eq!(result.risk_score, 45.0);
    assert!((result.confidence - 0.90).abs() < 1e-9);
    assert_eq!(result.investment_score, 100.0);
}

#[test]
fn given_extreme_draws_when_scoring_then_confidence_stays_in_band() {
    for draw in [0.0, 1.0, 7.5, -3.0] {
        let engine = scoring_engine(draw);
        let result = engine.score(&sample_features(), Horizon::default()).unwrap();

        assert!((0.85..=0.95).contains(&result.confidence), "draw {draw}");
        assert!((0.0..=100.0).contains(&result.risk_score), "draw {draw}");
    }
}

#[test]
fn given_range_of_valid_features_when_scoring_then_scores_are_bounded() {
    let engine = ScoringEngine::new(Arc::new(SeededRandom::new(7)));
    let corners = [
        PropertyFeatures::new(1_000.0, 0.0, 1.0, 1.0, 100.0),
        PropertyFeatures::new(500_000.0, 100.0, 20.0, 10.0, 1_000_000.0),
        PropertyFeatures::new(39_999.0, 45.0, 3.0, 1.0, 9_999.0),
        PropertyFeatures::new(90_001.0, 9.0, 12.0, 6.0, 300_001.0),
    ];

    for features in corners {
        let result = engine.score(&features, Horizon::default()).unwrap();

        assert!(base_price(&features) > 0.0);
        for score in [
            result.investment_score,
            result.appreciation_potential,
            result.risk_score,
        ] {
            assert!((0.0..=100.0).contains(&score), "{features:?} gave {score}");
        }
    }
}

#[test]
fn given_long_horizon_when_projecting_then_confidence_declines_to_floor() {
    let engine = scoring_engine(0.5);
    let horizon = Horizon::new(Horizon::MAX_YEARS).unwrap();

    let result = engine.score(&sample_features(), horizon).unwrap();

    assert_eq!(result.projections.len(), 30);
    for pair in result.projections.windows(2) {
        assert_eq!(pair[1].year, pair[0].year + 1);
        assert!(pair[1].confidence_level <= pair[0].confidence_level);
    }
    let last = result.projections.last().unwrap();
    assert_eq!(last.confidence_level, 0.5);
    assert!((result.projections[0].confidence_level - 0.91).abs() < 1e-9);
}

#[test]
fn given_top_investment_score_when_projecting_then_base_rate_reflects_it() {
    let engine = scoring_engine(0.5);

    let result = engine
        .score(&sample_features(), Horizon::new(1).unwrap())
        .unwrap();

    assert_eq!(result.projections[0].market_factors.base_rate, 8.0);
}

#[test]
fn given_out_of_range_income_when_scoring_then_validation_names_the_field() {
    let engine = scoring_engine(0.5);
    let features = PropertyFeatures::new(500.0, 5.0, 7.0, 4.0, 35_000.0);

    let err = engine.score(&features, Horizon::default()).unwrap_err();

    assert!(err.has_field("avgAreaIncome"));
    assert_eq!(err.violations.len(), 1);
}

#[test]
fn given_non_finite_feature_when_scoring_then_rejected() {
    let engine = scoring_engine(0.5);
    let features = PropertyFeatures::new(75_000.0, f64::NAN, 7.0, 4.0, 35_000.0);

    let err = engine.score(&features, Horizon::default()).unwrap_err();

    assert!(err.has_field("avgAreaHouseAge"));
}

#[test]
fn given_same_seed_when_scoring_twice_then_results_match() {
    let first = ScoringEngine::new(Arc::new(SeededRandom::new(42)))
        .score_from_year(&sample_features(), Horizon::default(), 2026)
        .unwrap();
    let second = ScoringEngine::new(Arc::new(SeededRandom::new(42)))
        .score_from_year(&sample_features(), Horizon::default(), 2026)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn given_pure_formulas_when_called_directly_then_agree_with_engine() {
    let features = sample_features();
    let engine = ScoringEngine::new(Arc::new(FixedRandom(0.0)));

    let result = engine.score(&features, Horizon::default()).unwrap();

    assert_eq!(result.investment_score, investment_score(&features).round());
    assert_eq!(
        result.appreciation_potential,
        appreciation_potential(&features).round()
    );
    assert_eq!(result.risk_score, risk_score(&features, 0.0).round());
}
