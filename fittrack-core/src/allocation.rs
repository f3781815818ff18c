//! Equal-split allocation of the daily goal across the active set.
//!
//! Allocation is a derived projection of (goal, activity set): it is
//! recomputed for the whole set after every insertion and removal, never
//! patched incrementally.

use crate::activity::Activity;
use crate::error::EngineError;

/// Recompute per-activity calorie and duration allocations.
///
/// Each activity gets `floor(goal / count)` calories; the remainder of the
/// integer split is dropped, not redistributed. Required minutes round up
/// so the allocated calories are always reachable at the activity's burn
/// rate. An empty set is returned unchanged — nothing to split, and no
/// prior allocation is disturbed.
pub fn reallocate(
    mut activities: Vec<Activity>,
    daily_goal_calories: u32,
) -> Result<Vec<Activity>, EngineError> {
    if activities.is_empty() {
        return Ok(activities);
    }

    if let Some(bad) = activities.iter().find(|a| a.calories_per_minute == 0) {
        return Err(EngineError::InvalidInput {
            reason: format!("activity {} ({}) has a zero burn rate", bad.id, bad.name),
        });
    }

    let share = daily_goal_calories / activities.len() as u32;
    for activity in activities.iter_mut() {
        activity.allocated_calories = share;
        activity.required_minutes = share.div_ceil(activity.calories_per_minute);
    }
    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_template;

    fn pending(id: &str, name: &str) -> Activity {
        Activity::from_template(id, find_template(name).unwrap())
    }

    #[test]
    fn test_even_split_with_ceil_minutes() {
        let set = vec![pending("1", "Running"), pending("2", "Walking")];
        let set = reallocate(set, 2000).unwrap();

        assert_eq!(set[0].allocated_calories, 1000);
        assert_eq!(set[0].required_minutes, 84); // ceil(1000 / 12)
        assert_eq!(set[1].allocated_calories, 1000);
        assert_eq!(set[1].required_minutes, 250); // ceil(1000 / 4)
    }

    #[test]
    fn test_remainder_is_dropped_not_redistributed() {
        let set = vec![
            pending("1", "Running"),
            pending("2", "Walking"),
            pending("3", "Yoga"),
        ];
        let set = reallocate(set, 1000).unwrap();

        let total: u32 = set.iter().map(|a| a.allocated_calories).sum();
        assert!(set.iter().all(|a| a.allocated_calories == 333));
        assert_eq!(total, 999);
        assert!(total <= 1000);
    }

    #[test]
    fn test_empty_set_is_a_no_op() {
        let set = reallocate(Vec::new(), 2000).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let mut broken = pending("1", "Plank");
        broken.calories_per_minute = 0;
        let err = reallocate(vec![broken], 2000).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput { .. }));
    }

    #[test]
    fn test_reallocation_is_idempotent() {
        let set = vec![pending("1", "Cycling"), pending("2", "Squats")];
        let once = reallocate(set, 1500).unwrap();
        let twice = reallocate(once.clone(), 1500).unwrap();
        assert_eq!(once, twice);
    }
}
