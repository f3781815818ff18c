//! BMI computation from anthropometric inputs.
//!
//! A record is immutable once computed: a new submission replaces it
//! wholesale. Age and gender never enter the BMI value itself; they are
//! carried on the record for the calorie-goal derivation.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Category bands with exclusive upper bounds at 18.5 / 25 / 30.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Category is a pure function of the BMI value.
    pub fn classify(value: f64) -> Self {
        if value < 18.5 {
            BmiCategory::Underweight
        } else if value < 25.0 {
            BmiCategory::Normal
        } else if value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

/// A computed BMI plus the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    pub value: f64,
    pub category: BmiCategory,
    pub age_years: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: Gender,
}

/// Compute BMI from height (cm) and weight (kg).
///
/// Non-positive or non-finite height/weight and a zero age are rejected
/// with `InvalidInput` rather than propagated as NaN/Infinity.
pub fn compute_bmi(
    height_cm: f64,
    weight_kg: f64,
    age_years: u32,
    gender: Gender,
) -> Result<BmiRecord, EngineError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(EngineError::InvalidInput {
            reason: format!("height must be a positive number of cm, got {height_cm}"),
        });
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(EngineError::InvalidInput {
            reason: format!("weight must be a positive number of kg, got {weight_kg}"),
        });
    }
    if age_years == 0 {
        return Err(EngineError::InvalidInput {
            reason: "age must be at least 1 year".to_string(),
        });
    }

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);

    Ok(BmiRecord {
        value,
        category: BmiCategory::classify(value),
        age_years,
        height_cm,
        weight_kg,
        gender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries() {
        assert_eq!(BmiCategory::classify(17.9), BmiCategory::Underweight);
        assert_eq!(BmiCategory::classify(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(24.99), BmiCategory::Normal);
        assert_eq!(BmiCategory::classify(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(29.99), BmiCategory::Overweight);
        assert_eq!(BmiCategory::classify(30.0), BmiCategory::Obese);
    }

    #[test]
    fn test_compute_bmi_normal_adult() {
        let record = compute_bmi(175.0, 70.0, 30, Gender::Male).unwrap();
        // 70 / 1.75^2 = 22.857...
        assert!((record.value - 22.857).abs() < 0.001);
        assert_eq!(record.category, BmiCategory::Normal);
        assert_eq!(record.height_cm, 175.0);
        assert_eq!(record.weight_kg, 70.0);
    }

    #[test]
    fn test_rejects_non_positive_metrics() {
        assert!(matches!(
            compute_bmi(0.0, 70.0, 30, Gender::Male),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_bmi(175.0, -4.0, 30, Gender::Female),
            Err(EngineError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_bmi(175.0, 70.0, 0, Gender::Male),
            Err(EngineError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_metrics() {
        assert!(compute_bmi(f64::NAN, 70.0, 30, Gender::Male).is_err());
        assert!(compute_bmi(175.0, f64::INFINITY, 30, Gender::Male).is_err());
    }
}
