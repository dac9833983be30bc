use serde::{Deserialize, Serialize};

use super::FeatureValidationError;

/// Number of future years a projection covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Horizon(u32);

impl Horizon {
    pub const MIN_YEARS: u32 = 1;
    pub const MAX_YEARS: u32 = 30;
    pub const DEFAULT_YEARS: u32 = 10;

    pub fn new(years: u32) -> Result<Self, FeatureValidationError> {
        if (Self::MIN_YEARS..=Self::MAX_YEARS).contains(&years) {
            Ok(Self(years))
        } else {
            Err(FeatureValidationError::single(
                "years",
                format!(
                    "Horizon must be between {} and {} years",
                    Self::MIN_YEARS,
                    Self::MAX_YEARS
                ),
            ))
        }
    }

    pub fn years(&self) -> u32 {
        self.0
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(Self::DEFAULT_YEARS)
    }
}

impl TryFrom<u32> for Horizon {
    type Error = FeatureValidationError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

impl From<Horizon> for u32 {
    fn from(horizon: Horizon) -> Self {
        horizon.0
    }
}
