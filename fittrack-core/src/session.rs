//! Session state container.
//!
//! The single owner of profile, activities and daily progress for the
//! lifetime of a session. Mutations delegate to the pure engines and
//! re-evaluate achievements at every point that can newly satisfy a rule.
//! Persistence is an injected collaborator; the container never touches
//! storage itself, and it never reads the wall clock — callers pass `now`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::evaluate_achievements;
use crate::activity::{Activity, ActivityStatus};
use crate::allocation::reallocate;
use crate::bmi::{compute_bmi, BmiRecord, Gender};
use crate::catalog::find_template;
use crate::error::EngineError;
use crate::goal::{daily_calorie_goal, GoalTier};
use crate::profile::UserProfile;

/// The persisted record set: profile, activity list, daily progress.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub profile: UserProfile,
    pub activities: Vec<Activity>,
    pub daily_progress: u32,
}

/// Injected read/write collaborator for session persistence.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionSnapshot>>;
    fn save(&self, snapshot: &SessionSnapshot) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Session {
    profile: UserProfile,
    activities: Vec<Activity>,
    daily_progress: u32,
    next_activity_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::from_snapshot(SessionSnapshot::default())
    }

    /// Restore from a persisted snapshot. The id counter resumes above the
    /// highest numeric activity id already present.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        let next_activity_id = snapshot
            .activities
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);

        Self {
            profile: snapshot.profile,
            activities: snapshot.activities,
            daily_progress: snapshot.daily_progress,
            next_activity_id,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            profile: self.profile.clone(),
            activities: self.activities.clone(),
            daily_progress: self.daily_progress,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn daily_progress(&self) -> u32 {
        self.daily_progress
    }

    pub fn daily_goal(&self) -> u32 {
        self.profile.daily_calorie_goal
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.profile.name = name.into();
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.profile.bio = bio.into();
    }

    pub fn set_avatar(&mut self, avatar: impl Into<String>) {
        self.profile.avatar = avatar.into();
    }

    /// Submit a new BMI computation.
    ///
    /// Replaces the record wholesale, overwrites the daily goal for the
    /// current tier, and re-evaluates achievements. Existing allocations
    /// are untouched until the activity set next changes.
    pub fn submit_bmi(
        &mut self,
        height_cm: f64,
        weight_kg: f64,
        age_years: u32,
        gender: Gender,
        now: DateTime<Utc>,
    ) -> Result<BmiRecord, EngineError> {
        let record = compute_bmi(height_cm, weight_kg, age_years, gender)?;
        self.profile.bmi = Some(record);
        self.profile.daily_calorie_goal =
            daily_calorie_goal(self.profile.bmi.as_ref(), self.profile.goal);
        self.evaluate(now);
        Ok(record)
    }

    /// Change the goal tier and overwrite the daily goal.
    ///
    /// Re-evaluates achievements: a lowered goal can newly satisfy the
    /// goal-reached rule.
    pub fn set_goal_tier(&mut self, tier: GoalTier, now: DateTime<Utc>) -> u32 {
        self.profile.goal = tier;
        self.profile.daily_calorie_goal = daily_calorie_goal(self.profile.bmi.as_ref(), tier);
        self.evaluate(now);
        self.profile.daily_calorie_goal
    }

    /// Add an activity from the catalog and reallocate the whole set.
    ///
    /// A name may appear at most once in the set. Returns the id of the
    /// new instance.
    pub fn add_activity(&mut self, name: &str) -> Result<String, EngineError> {
        let template = find_template(name).ok_or_else(|| EngineError::NotFound {
            id: name.to_string(),
        })?;
        if self.activities.iter().any(|a| a.name == template.name) {
            return Err(EngineError::InvalidOperation {
                reason: format!("{} is already in the activity set", template.name),
            });
        }

        let id = self.next_activity_id.to_string();
        let mut updated = self.activities.clone();
        updated.push(Activity::from_template(id.clone(), template));

        self.activities = reallocate(updated, self.profile.daily_calorie_goal)?;
        self.next_activity_id += 1;
        Ok(id)
    }

    /// Remove a pending activity and reallocate the remaining set.
    ///
    /// Completed activities cannot be removed — their credited progress
    /// and any achievements derived from them stay intact.
    pub fn remove_activity(&mut self, id: &str) -> Result<Activity, EngineError> {
        let idx = self
            .activities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| EngineError::NotFound { id: id.to_string() })?;
        if self.activities[idx].is_completed() {
            return Err(EngineError::InvalidOperation {
                reason: format!("activity {id} is completed and cannot be removed"),
            });
        }

        let mut updated = self.activities.clone();
        let removed = updated.remove(idx);
        self.activities = reallocate(updated, self.profile.daily_calorie_goal)?;
        Ok(removed)
    }

    /// Complete a pending activity: terminal transition.
    ///
    /// Credits the activity's allocated calories to daily progress, clamped
    /// so progress never exceeds the daily goal, then re-evaluates
    /// achievements. Returns the credited amount.
    pub fn complete_activity(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<u32, EngineError> {
        let idx = self
            .activities
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| EngineError::NotFound { id: id.to_string() })?;
        if self.activities[idx].is_completed() {
            return Err(EngineError::InvalidTransition { id: id.to_string() });
        }

        let credited = self.activities[idx].allocated_calories;
        self.activities[idx].status = ActivityStatus::Completed;
        self.activities[idx].completed_at = Some(now);
        self.daily_progress =
            (self.daily_progress + credited).min(self.profile.daily_calorie_goal);
        self.evaluate(now);
        Ok(credited)
    }

    fn evaluate(&mut self, now: DateTime<Utc>) {
        let merged =
            evaluate_achievements(&self.profile, &self.activities, self.daily_progress, now);
        self.profile.achievements = merged;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 2, 7, 30, 0).unwrap()
    }

    #[test]
    fn test_end_to_end_running_and_walking() {
        // No BMI, moderate tier: goal 2000.
        let mut session = Session::new();
        assert_eq!(session.daily_goal(), 2000);

        let running = session.add_activity("Running").unwrap();
        let walking = session.add_activity("Walking").unwrap();

        let set = session.activities();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|a| a.allocated_calories == 1000));
        assert_eq!(session.activity(&running).unwrap().required_minutes, 84);
        assert_eq!(session.activity(&walking).unwrap().required_minutes, 250);

        let credited = session.complete_activity(&running, now()).unwrap();
        assert_eq!(credited, 1000);
        assert_eq!(session.daily_progress(), 1000);
        let earned: Vec<AchievementId> =
            session.profile().achievements.iter().map(|a| a.id).collect();
        assert_eq!(earned, vec![AchievementId::FirstActivity]);

        session.complete_activity(&walking, now()).unwrap();
        assert_eq!(session.daily_progress(), 2000);
        assert!(session
            .profile()
            .achievements
            .iter()
            .any(|a| a.id == AchievementId::GoalReached));
    }

    #[test]
    fn test_double_completion_is_rejected_and_progress_unchanged() {
        let mut session = Session::new();
        let id = session.add_activity("Running").unwrap();

        session.complete_activity(&id, now()).unwrap();
        let progress = session.daily_progress();

        let err = session.complete_activity(&id, now()).unwrap_err();
        assert_eq!(err, EngineError::InvalidTransition { id: id.clone() });
        assert_eq!(session.daily_progress(), progress);
    }

    #[test]
    fn test_progress_is_clamped_at_goal() {
        let mut session = Session::new();
        let running = session.add_activity("Running").unwrap();
        session.complete_activity(&running, now()).unwrap();

        // Each later add reallocates over the full set, completed included,
        // so further completions would push past the goal without the clamp.
        let cycling = session.add_activity("Cycling").unwrap();
        let yoga = session.add_activity("Yoga").unwrap();
        session.complete_activity(&cycling, now()).unwrap();
        session.complete_activity(&yoga, now()).unwrap();

        assert!(session.daily_progress() <= session.daily_goal());
    }

    #[test]
    fn test_removal_reallocates_remaining_set() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.profile.daily_calorie_goal = 900;
        let mut session = Session::from_snapshot(snapshot);

        let a = session.add_activity("Running").unwrap();
        session.add_activity("Walking").unwrap();
        session.add_activity("Yoga").unwrap();
        assert!(session.activities().iter().all(|x| x.allocated_calories == 300));

        session.remove_activity(&a).unwrap();
        let set = session.activities();
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|x| x.allocated_calories == 450));
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut session = Session::new();
        session.add_activity("Swimming").unwrap();
        let err = session.add_activity("swimming").unwrap_err();
        assert!(matches!(err, EngineError::InvalidOperation { .. }));
        assert_eq!(session.activities().len(), 1);
    }

    #[test]
    fn test_unknown_catalog_name_is_not_found() {
        let mut session = Session::new();
        let err = session.add_activity("Skiing").unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn test_removing_completed_activity_is_rejected() {
        let mut session = Session::new();
        let id = session.add_activity("Plank").unwrap();
        session.complete_activity(&id, now()).unwrap();

        let err = session.remove_activity(&id).unwrap_err();
        assert!(matches!(err, EngineError::InvalidOperation { .. }));
        assert_eq!(session.activities().len(), 1);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut session = Session::new();
        assert!(matches!(
            session.complete_activity("99", now()),
            Err(EngineError::NotFound { .. })
        ));
        assert!(matches!(
            session.remove_activity("99"),
            Err(EngineError::NotFound { .. })
        ));
    }

    #[test]
    fn test_bmi_submission_overwrites_goal_and_earns_achievement() {
        let mut session = Session::new();
        let record = session
            .submit_bmi(170.0, 70.0, 30, Gender::Male, now())
            .unwrap();
        assert_eq!(record.category, crate::bmi::BmiCategory::Normal);
        // round(1671.672 * 1.4 * 0.25)
        assert_eq!(session.daily_goal(), 585);
        assert!(session
            .profile()
            .achievements
            .iter()
            .any(|a| a.id == AchievementId::BmiComputed));
    }

    #[test]
    fn test_tier_change_overwrites_goal() {
        let mut session = Session::new();
        assert_eq!(session.set_goal_tier(GoalTier::Extreme, now()), 3200);
        assert_eq!(session.profile().goal, GoalTier::Extreme);

        session.submit_bmi(170.0, 70.0, 30, Gender::Male, now()).unwrap();
        // 1671.672 * 1.8 * 0.25 = 752.2524
        assert_eq!(session.daily_goal(), 752);
    }

    #[test]
    fn test_goal_reached_is_not_duplicated_on_tier_change() {
        let mut session = Session::new();
        let id = session.add_activity("Burpees").unwrap();
        session.complete_activity(&id, now()).unwrap();
        assert_eq!(session.daily_progress(), 2000);
        assert!(session
            .profile()
            .achievements
            .iter()
            .any(|a| a.id == AchievementId::GoalReached));

        // Already granted; a later tier change must not duplicate it.
        session.set_goal_tier(GoalTier::Hard, now());
        let count = session
            .profile()
            .achievements
            .iter()
            .filter(|a| a.id == AchievementId::GoalReached)
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_lowered_goal_can_newly_satisfy_goal_reached() {
        let mut snapshot = SessionSnapshot::default();
        snapshot.profile.goal = GoalTier::Extreme;
        snapshot.profile.daily_calorie_goal = 3200;
        snapshot.daily_progress = 2500;
        let mut session = Session::from_snapshot(snapshot);
        assert!(session.profile().achievements.is_empty());

        session.set_goal_tier(GoalTier::Moderate, now());
        assert_eq!(session.daily_goal(), 2000);
        assert!(session
            .profile()
            .achievements
            .iter()
            .any(|a| a.id == AchievementId::GoalReached));
    }

    #[test]
    fn test_snapshot_round_trip_restores_id_counter() {
        let mut session = Session::new();
        session.add_activity("Running").unwrap();
        session.add_activity("Walking").unwrap();
        session.set_name("Jordan");

        let json = serde_json::to_string(&session.snapshot()).unwrap();
        let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();
        let mut session = Session::from_snapshot(restored);

        assert_eq!(session.profile().name, "Jordan");
        assert_eq!(session.activities().len(), 2);

        // Ids 1 and 2 are taken; the counter resumes at 3.
        let id = session.add_activity("Yoga").unwrap();
        assert_eq!(id, "3");
    }

    #[test]
    fn test_empty_set_keeps_prior_progress() {
        let mut session = Session::new();
        let id = session.add_activity("Running").unwrap();
        session.remove_activity(&id).unwrap();
        assert!(session.activities().is_empty());
        assert_eq!(session.daily_progress(), 0);
    }
}
