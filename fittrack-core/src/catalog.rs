//! Fixed activity catalog.
//!
//! Read-only reference data: the only activities a user can add. Burn
//! rates are copied onto the activity instance at creation time.

use serde::{Deserialize, Serialize};

/// Closed icon set. An unknown icon key fails at the serialization
/// boundary instead of silently falling back to a default glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityIcon {
    Running,
    Jogging,
    Pushups,
    Cycling,
    Swimming,
    Walking,
    Weightlifting,
    Yoga,
    JumpingJacks,
    Burpees,
    Plank,
    Squats,
}

/// A catalog entry: display name, icon key, calories burned per minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityTemplate {
    pub name: &'static str,
    pub icon: ActivityIcon,
    pub calories_per_minute: u32,
}

pub const ACTIVITY_TEMPLATES: [ActivityTemplate; 12] = [
    ActivityTemplate { name: "Running", icon: ActivityIcon::Running, calories_per_minute: 12 },
    ActivityTemplate { name: "Jogging", icon: ActivityIcon::Jogging, calories_per_minute: 8 },
    ActivityTemplate { name: "Push-ups", icon: ActivityIcon::Pushups, calories_per_minute: 6 },
    ActivityTemplate { name: "Cycling", icon: ActivityIcon::Cycling, calories_per_minute: 10 },
    ActivityTemplate { name: "Swimming", icon: ActivityIcon::Swimming, calories_per_minute: 11 },
    ActivityTemplate { name: "Walking", icon: ActivityIcon::Walking, calories_per_minute: 4 },
    ActivityTemplate { name: "Weight Lifting", icon: ActivityIcon::Weightlifting, calories_per_minute: 7 },
    ActivityTemplate { name: "Yoga", icon: ActivityIcon::Yoga, calories_per_minute: 3 },
    ActivityTemplate { name: "Jumping Jacks", icon: ActivityIcon::JumpingJacks, calories_per_minute: 9 },
    ActivityTemplate { name: "Burpees", icon: ActivityIcon::Burpees, calories_per_minute: 14 },
    ActivityTemplate { name: "Plank", icon: ActivityIcon::Plank, calories_per_minute: 5 },
    ActivityTemplate { name: "Squats", icon: ActivityIcon::Squats, calories_per_minute: 8 },
];

/// Catalog lookup by display name (case-insensitive, so CLI input like
/// "running" resolves to "Running").
pub fn find_template(name: &str) -> Option<&'static ActivityTemplate> {
    ACTIVITY_TEMPLATES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rates_are_positive() {
        for template in &ACTIVITY_TEMPLATES {
            assert!(template.calories_per_minute > 0, "{}", template.name);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(find_template("running").unwrap().calories_per_minute, 12);
        assert_eq!(find_template("WALKING").unwrap().calories_per_minute, 4);
        assert_eq!(find_template("Weight Lifting").unwrap().calories_per_minute, 7);
        assert!(find_template("Skiing").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in ACTIVITY_TEMPLATES.iter().enumerate() {
            for b in &ACTIVITY_TEMPLATES[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }
}
