//! Daily calorie-burn goal derivation.
//!
//! Two modes: a flat baseline when no BMI record exists, and a
//! Harris-Benedict BMR estimate scaled by an activity multiplier when one
//! does. The two multiplier tables are intentionally distinct — they scale
//! different baselines.

use serde::{Deserialize, Serialize};

use crate::bmi::{BmiRecord, Gender};

/// Flat daily target used when no BMI record exists (kcal).
const BASELINE_CALORIES: f64 = 2000.0;

/// The exercise-burn target is a fixed slice of estimated total daily
/// expenditure.
const EXERCISE_SHARE_OF_TDEE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalTier {
    Moderate,
    Hard,
    Extreme,
}

impl GoalTier {
    /// Multiplier applied to the flat baseline when no BMI is present.
    pub fn baseline_multiplier(self) -> f64 {
        match self {
            GoalTier::Moderate => 1.0,
            GoalTier::Hard => 1.3,
            GoalTier::Extreme => 1.6,
        }
    }

    /// Activity-level multiplier applied to BMR when a BMI record is
    /// present.
    pub fn tdee_multiplier(self) -> f64 {
        match self {
            GoalTier::Moderate => 1.4,
            GoalTier::Hard => 1.6,
            GoalTier::Extreme => 1.8,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GoalTier::Moderate => "moderate",
            GoalTier::Hard => "hard",
            GoalTier::Extreme => "extreme",
        }
    }
}

/// Harris-Benedict basal metabolic rate (kcal/day), sex-specific.
fn basal_metabolic_rate(bmi: &BmiRecord) -> f64 {
    let age = f64::from(bmi.age_years);
    match bmi.gender {
        Gender::Male => 88.362 + 13.397 * bmi.weight_kg + 4.799 * bmi.height_cm - 5.677 * age,
        Gender::Female => 447.593 + 9.247 * bmi.weight_kg + 3.098 * bmi.height_cm - 4.330 * age,
    }
}

/// Daily calorie-burn goal for the given tier.
///
/// Overwrites the stored goal whenever the BMI record or the tier changes;
/// the computation is never incremental.
pub fn daily_calorie_goal(bmi: Option<&BmiRecord>, tier: GoalTier) -> u32 {
    match bmi {
        None => (BASELINE_CALORIES * tier.baseline_multiplier()).round() as u32,
        Some(record) => {
            let tdee = basal_metabolic_rate(record) * tier.tdee_multiplier();
            (tdee * EXERCISE_SHARE_OF_TDEE).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::compute_bmi;

    #[test]
    fn test_goal_without_bmi() {
        assert_eq!(daily_calorie_goal(None, GoalTier::Moderate), 2000);
        assert_eq!(daily_calorie_goal(None, GoalTier::Hard), 2600);
        assert_eq!(daily_calorie_goal(None, GoalTier::Extreme), 3200);
    }

    #[test]
    fn test_goal_with_bmi_male() {
        let record = compute_bmi(170.0, 70.0, 30, Gender::Male).unwrap();
        // BMR = 88.362 + 13.397*70 + 4.799*170 - 5.677*30 = 1671.672
        // goal = round(1671.672 * 1.4 * 0.25) = 585
        assert_eq!(daily_calorie_goal(Some(&record), GoalTier::Moderate), 585);
    }

    #[test]
    fn test_goal_with_bmi_female() {
        let record = compute_bmi(165.0, 60.0, 25, Gender::Female).unwrap();
        // BMR = 447.593 + 9.247*60 + 3.098*165 - 4.330*25 = 1405.333
        // goal = round(1405.333 * 1.4 * 0.25) = 492
        assert_eq!(daily_calorie_goal(Some(&record), GoalTier::Moderate), 492);
    }

    #[test]
    fn test_tiers_strictly_increase_goal() {
        let record = compute_bmi(180.0, 82.0, 40, Gender::Male).unwrap();
        let moderate = daily_calorie_goal(Some(&record), GoalTier::Moderate);
        let hard = daily_calorie_goal(Some(&record), GoalTier::Hard);
        let extreme = daily_calorie_goal(Some(&record), GoalTier::Extreme);
        assert!(moderate < hard);
        assert!(hard < extreme);
    }
}
