use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FeatureValidationError, FieldViolation};

/// The five numeric area attributes a valuation is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFeatures {
    #[validate(range(
        min = 1000.0,
        max = 500000.0,
        message = "Income must be between $1,000 and $500,000"
    ))]
    pub avg_area_income: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Age must be between 0 and 100 years"))]
    pub avg_area_house_age: f64,
    #[validate(range(min = 1.0, max = 20.0, message = "Rooms must be between 1 and 20"))]
    pub avg_area_number_of_rooms: f64,
    #[validate(range(min = 1.0, max = 10.0, message = "Bedrooms must be between 1 and 10"))]
    pub avg_area_number_of_bedrooms: f64,
    #[validate(range(
        min = 100.0,
        max = 1000000.0,
        message = "Population must be between 100 and 1,000,000"
    ))]
    pub area_population: f64,
}

impl PropertyFeatures {
    pub const FIELD_NAMES: [&'static str; 5] = [
        "avgAreaIncome",
        "avgAreaHouseAge",
        "avgAreaNumberOfRooms",
        "avgAreaNumberOfBedrooms",
        "areaPopulation",
    ];

    pub fn new(income: f64, house_age: f64, rooms: f64, bedrooms: f64, population: f64) -> Self {
        Self {
            avg_area_income: income,
            avg_area_house_age: house_age,
            avg_area_number_of_rooms: rooms,
            avg_area_number_of_bedrooms: bedrooms,
            area_population: population,
        }
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        let [income, house_age, rooms, bedrooms, population] = values;
        Self::new(income, house_age, rooms, bedrooms, population)
    }

    pub fn as_array(&self) -> [f64; 5] {
        [
            self.avg_area_income,
            self.avg_area_house_age,
            self.avg_area_number_of_rooms,
            self.avg_area_number_of_bedrooms,
            self.area_population,
        ]
    }

    /// Checks every feature against its documented range.
    pub fn check(&self) -> Result<(), FeatureValidationError> {
        let non_finite: Vec<FieldViolation> = Self::FIELD_NAMES
            .iter()
            .zip(self.as_array())
            .filter(|(_, value)| !value.is_finite())
            .map(|(field, _)| FieldViolation::new(*field, "Value must be a finite number"))
            .collect();

        if !non_finite.is_empty() {
            return Err(FeatureValidationError::new(non_finite));
        }

        self.validate().map_err(|errors| {
            let mut violations: Vec<FieldViolation> = errors
                .field_errors()
                .into_iter()
                .flat_map(|(field, field_errors)| {
                    let field = to_camel_case(&field);
                    field_errors
                        .iter()
                        .map(|e| {
                            let message = e
                                .message
                                .clone()
                                .unwrap_or_else(|| Cow::Owned(e.code.to_string()));
                            FieldViolation::new(field.clone(), message)
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
            violations.sort_by(|a, b| a.field.cmp(&b.field));
            FeatureValidationError::new(violations)
        })
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
