//! Achievement catalog and the monotonic evaluator.
//!
//! The earned set only grows: an id granted once is idempotently skipped on
//! later evaluations and keeps its original timestamp, even if the trigger
//! condition no longer holds. Several catalog entries ship without a wired
//! evaluation rule; they are presentation reference data and are never
//! granted here.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::profile::UserProfile;

/// Activity names counted as endurance sessions.
const ENDURANCE_NAMES: [&str; 2] = ["Running", "Jogging"];

/// Completed endurance sessions needed for `five-endurance-sessions`.
const ENDURANCE_SESSIONS_REQUIRED: usize = 5;

/// Distinct completed activity names needed for `ten-distinct-types`.
const DISTINCT_TYPES_REQUIRED: usize = 10;

/// Stable catalog ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first-activity")]
    FirstActivity,
    #[serde(rename = "goal-reached")]
    GoalReached,
    #[serde(rename = "week-streak")]
    WeekStreak,
    #[serde(rename = "bmi-computed")]
    BmiComputed,
    #[serde(rename = "five-endurance-sessions")]
    FiveEnduranceSessions,
    #[serde(rename = "thirty-day-consistency")]
    ThirtyDayConsistency,
    #[serde(rename = "total-calories-burned")]
    TotalCaloriesBurned,
    #[serde(rename = "ten-distinct-types")]
    TenDistinctTypes,
    #[serde(rename = "perfect-week")]
    PerfectWeek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementIcon {
    Star,
    Target,
    Calendar,
    Trophy,
    Zap,
    Crown,
    Flame,
    Medal,
    Award,
}

/// Static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementSpec {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: AchievementIcon,
}

pub const ACHIEVEMENT_CATALOG: [AchievementSpec; 9] = [
    AchievementSpec {
        id: AchievementId::FirstActivity,
        title: "First Steps",
        description: "Complete your first activity",
        icon: AchievementIcon::Star,
    },
    AchievementSpec {
        id: AchievementId::GoalReached,
        title: "Goal Crusher",
        description: "Reach your daily calorie goal",
        icon: AchievementIcon::Target,
    },
    AchievementSpec {
        id: AchievementId::WeekStreak,
        title: "Week Warrior",
        description: "Complete activities for 7 consecutive days",
        icon: AchievementIcon::Calendar,
    },
    AchievementSpec {
        id: AchievementId::BmiComputed,
        title: "BMI Master",
        description: "Calculate and update your BMI",
        icon: AchievementIcon::Trophy,
    },
    AchievementSpec {
        id: AchievementId::FiveEnduranceSessions,
        title: "Speed Demon",
        description: "Complete 5 running activities",
        icon: AchievementIcon::Zap,
    },
    AchievementSpec {
        id: AchievementId::ThirtyDayConsistency,
        title: "Consistency King",
        description: "Complete activities for 30 days",
        icon: AchievementIcon::Crown,
    },
    AchievementSpec {
        id: AchievementId::TotalCaloriesBurned,
        title: "Calorie Burner",
        description: "Burn 10,000 total calories",
        icon: AchievementIcon::Flame,
    },
    AchievementSpec {
        id: AchievementId::TenDistinctTypes,
        title: "Activity Explorer",
        description: "Try 10 different activity types",
        icon: AchievementIcon::Medal,
    },
    AchievementSpec {
        id: AchievementId::PerfectWeek,
        title: "Perfect Week",
        description: "Reach daily goal every day for a week",
        icon: AchievementIcon::Award,
    },
];

/// An earned achievement, stamped at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub date_earned: DateTime<Utc>,
}

impl Achievement {
    fn from_spec(spec: &AchievementSpec, earned_at: DateTime<Utc>) -> Self {
        Self {
            id: spec.id,
            title: spec.title.to_string(),
            description: spec.description.to_string(),
            icon: spec.icon,
            date_earned: earned_at,
        }
    }
}

/// Whether the wired rule for `id` holds in the current state.
///
/// Ids without a wired rule always return false: week-streak,
/// thirty-day-consistency, total-calories-burned and perfect-week exist in
/// the catalog but have no evaluation logic.
fn rule_satisfied(
    id: AchievementId,
    activities: &[Activity],
    daily_progress: u32,
    daily_goal: u32,
    has_bmi: bool,
) -> bool {
    match id {
        AchievementId::FirstActivity => activities.iter().any(Activity::is_completed),
        AchievementId::GoalReached => daily_progress >= daily_goal,
        AchievementId::BmiComputed => has_bmi,
        AchievementId::FiveEnduranceSessions => {
            activities
                .iter()
                .filter(|a| a.is_completed() && ENDURANCE_NAMES.contains(&a.name.as_str()))
                .count()
                >= ENDURANCE_SESSIONS_REQUIRED
        }
        AchievementId::TenDistinctTypes => {
            let names: HashSet<&str> = activities
                .iter()
                .filter(|a| a.is_completed())
                .map(|a| a.name.as_str())
                .collect();
            names.len() >= DISTINCT_TYPES_REQUIRED
        }
        AchievementId::WeekStreak
        | AchievementId::ThirtyDayConsistency
        | AchievementId::TotalCaloriesBurned
        | AchievementId::PerfectWeek => false,
    }
}

/// Monotonic merge of the earned set with newly satisfied catalog ids.
///
/// Already-earned entries pass through untouched (no timestamp overwrite);
/// new grants are stamped with `now`. Calling twice with unchanged inputs
/// yields the same set.
pub fn evaluate_achievements(
    profile: &UserProfile,
    activities: &[Activity],
    daily_progress: u32,
    now: DateTime<Utc>,
) -> Vec<Achievement> {
    let mut earned = profile.achievements.clone();
    for spec in &ACHIEVEMENT_CATALOG {
        if earned.iter().any(|a| a.id == spec.id) {
            continue;
        }
        if rule_satisfied(
            spec.id,
            activities,
            daily_progress,
            profile.daily_calorie_goal,
            profile.bmi.is_some(),
        ) {
            earned.push(Achievement::from_spec(spec, now));
        }
    }
    earned
}
