//! User profile: identity, BMI record, goal tier, earned achievements.

use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::bmi::BmiRecord;
use crate::goal::GoalTier;

/// Daily goal in effect before any BMI or tier data exists.
pub const DEFAULT_DAILY_GOAL: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub bio: String,
    /// Opaque avatar reference (path or URL); presentation resolves it.
    pub avatar: String,
    /// Replaced wholesale on each BMI submission, never edited in place.
    pub bmi: Option<BmiRecord>,
    pub goal: GoalTier,
    pub daily_calorie_goal: u32,
    pub achievements: Vec<Achievement>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "Alex Johnson".to_string(),
            bio: "Fitness enthusiast on a journey to better health".to_string(),
            avatar: String::new(),
            bmi: None,
            goal: GoalTier::Moderate,
            daily_calorie_goal: DEFAULT_DAILY_GOAL,
            achievements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let p = UserProfile::default();
        assert_eq!(p.goal, GoalTier::Moderate);
        assert_eq!(p.daily_calorie_goal, DEFAULT_DAILY_GOAL);
        assert!(p.bmi.is_none());
        assert!(p.achievements.is_empty());
    }
}
