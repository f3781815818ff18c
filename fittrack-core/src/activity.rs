//! Activity instances and their pending → completed lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{ActivityIcon, ActivityTemplate};

/// Completed is terminal: there is no un-complete transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Pending,
    Completed,
}

/// One tracked activity.
///
/// The burn rate is copied from the catalog at creation; allocations start
/// at zero and are filled in by `allocation::reallocate` once the activity
/// joins the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub icon: ActivityIcon,
    pub calories_per_minute: u32,
    pub allocated_calories: u32,
    pub required_minutes: u32,
    pub status: ActivityStatus,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn from_template(id: impl Into<String>, template: &ActivityTemplate) -> Self {
        Self {
            id: id.into(),
            name: template.name.to_string(),
            icon: template.icon,
            calories_per_minute: template.calories_per_minute,
            allocated_calories: 0,
            required_minutes: 0,
            status: ActivityStatus::Pending,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_template;

    #[test]
    fn test_from_template_starts_pending_and_unallocated() {
        let a = Activity::from_template("7", find_template("Burpees").unwrap());
        assert_eq!(a.name, "Burpees");
        assert_eq!(a.calories_per_minute, 14);
        assert_eq!(a.allocated_calories, 0);
        assert_eq!(a.required_minutes, 0);
        assert_eq!(a.status, ActivityStatus::Pending);
        assert!(a.completed_at.is_none());
        assert!(!a.is_completed());
    }
}
