/// Source of uniform draws in `[0, 1)`.
///
/// Scoring and trend generation take their randomness from here so a run can be
/// pinned to a seed or a fixed value.
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}
