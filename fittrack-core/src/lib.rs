//! fittrack-core: engines and session state for the FitTracker app

pub mod error;
pub mod bmi;
pub mod goal;
pub mod catalog;
pub mod activity;
pub mod allocation;
pub mod achievements;
pub mod profile;
pub mod session;

pub use error::EngineError;
pub use bmi::{compute_bmi, BmiCategory, BmiRecord, Gender};
pub use goal::{daily_calorie_goal, GoalTier};
pub use catalog::{find_template, ActivityIcon, ActivityTemplate, ACTIVITY_TEMPLATES};
pub use activity::{Activity, ActivityStatus};
pub use allocation::reallocate;
pub use achievements::{
    evaluate_achievements, Achievement, AchievementIcon, AchievementId, AchievementSpec,
    ACHIEVEMENT_CATALOG,
};
pub use profile::{UserProfile, DEFAULT_DAILY_GOAL};
pub use session::{Session, SessionSnapshot, SessionStore};
