use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};

use fittrack_core::{
    AchievementId, Gender, GoalTier, Session, SessionStore, ACHIEVEMENT_CATALOG,
    ACTIVITY_TEMPLATES,
};

mod config;
mod state;
mod timer;

use config::{format_local, load_config, Config};
use state::FileStore;
use timer::TimerOutcome;

#[derive(Parser, Debug)]
#[command(name = "fittrack", version, about = "FitTracker command-line client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Compute BMI from body metrics and refresh the daily goal
    Bmi {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Height in cm
        #[arg(long)]
        height: f64,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// male or female
        #[arg(long)]
        gender: String,
    },

    /// Set the fitness goal tier (moderate, hard, extreme)
    Goal { tier: String },

    /// Manage today's activities
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },

    /// Show the achievement catalog and unlock status
    Achievements,

    /// Show today's calorie progress
    Progress,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Print the profile summary
    Show,

    /// Set the display name
    Name { name: String },

    /// Set the bio line
    Bio { bio: String },

    /// Set the avatar reference (path or URL)
    Avatar { avatar: String },
}

#[derive(Subcommand, Debug)]
enum ActivityCommand {
    /// Show the activity catalog
    Catalog,

    /// List today's activities with allocations
    List,

    /// Add an activity from the catalog
    Add { name: String },

    /// Remove a pending activity by id
    Remove { id: String },

    /// Run the countdown timer for an activity, then mark it complete
    Start { id: String },

    /// Mark an activity complete without running the timer
    Complete { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = FileStore::default_location()?;
    let config = load_config()?;
    let mut session = match store.load()? {
        Some(snapshot) => Session::from_snapshot(snapshot),
        None => Session::new(),
    };

    match cli.command {
        Command::Profile { command } => match command {
            ProfileCommand::Show => print_profile(&session),
            ProfileCommand::Name { name } => {
                session.set_name(name);
                store.save(&session.snapshot())?;
                println!("Name updated.");
            }
            ProfileCommand::Bio { bio } => {
                session.set_bio(bio);
                store.save(&session.snapshot())?;
                println!("Bio updated.");
            }
            ProfileCommand::Avatar { avatar } => {
                session.set_avatar(avatar);
                store.save(&session.snapshot())?;
                println!("Avatar updated.");
            }
        },

        Command::Bmi {
            age,
            height,
            weight,
            gender,
        } => {
            let gender = parse_gender(&gender)?;
            let before = earned_ids(&session);
            let record = session.submit_bmi(height, weight, age, gender, Utc::now())?;
            store.save(&session.snapshot())?;

            println!(
                "BMI {:.1} ({}) — daily burn goal is now {} cal",
                record.value,
                record.category.label(),
                session.daily_goal()
            );
            announce_new_achievements(&session, &before);
        }

        Command::Goal { tier } => {
            let tier = parse_tier(&tier)?;
            let before = earned_ids(&session);
            let goal = session.set_goal_tier(tier, Utc::now());
            store.save(&session.snapshot())?;

            println!("Goal tier set to {} — daily burn goal is now {goal} cal", tier.label());
            announce_new_achievements(&session, &before);
        }

        Command::Activity { command } => match command {
            ActivityCommand::Catalog => print_catalog(&session),
            ActivityCommand::List => print_activities(&session, &config),
            ActivityCommand::Add { name } => {
                let id = session.add_activity(&name)?;
                store.save(&session.snapshot())?;

                // Reallocation has already filled in the split.
                if let Some(a) = session.activity(&id) {
                    println!(
                        "Added {} (id {id}): {} cal target over {} minutes",
                        a.name, a.allocated_calories, a.required_minutes
                    );
                }
                print_activities(&session, &config);
            }
            ActivityCommand::Remove { id } => {
                let removed = session.remove_activity(&id)?;
                store.save(&session.snapshot())?;
                println!("Removed {} (id {id}).", removed.name);
                print_activities(&session, &config);
            }
            ActivityCommand::Start { id } => {
                let (name, minutes) = match session.activity(&id) {
                    Some(a) if a.is_completed() => bail!("activity {id} is already completed"),
                    Some(a) => (a.name.clone(), a.required_minutes),
                    None => bail!("no activity with id {id}"),
                };

                println!("Starting {name}: {minutes} minutes to go.");
                match timer::run_countdown(&name, minutes)? {
                    TimerOutcome::Elapsed => {
                        complete_and_report(&mut session, &store, &id)?;
                    }
                    TimerOutcome::Aborted => {
                        println!("Timer stopped — {name} stays pending.");
                    }
                }
            }
            ActivityCommand::Complete { id } => {
                complete_and_report(&mut session, &store, &id)?;
            }
        },

        Command::Achievements => print_achievements(&session, &config),

        Command::Progress => print_progress(&session),
    }

    Ok(())
}

fn parse_gender(s: &str) -> Result<Gender> {
    match s.to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        _ => bail!("unknown gender '{s}' (expected male or female)"),
    }
}

fn parse_tier(s: &str) -> Result<GoalTier> {
    match s.to_lowercase().as_str() {
        "moderate" => Ok(GoalTier::Moderate),
        "hard" => Ok(GoalTier::Hard),
        "extreme" => Ok(GoalTier::Extreme),
        _ => bail!("unknown goal tier '{s}' (expected moderate, hard or extreme)"),
    }
}

fn earned_ids(session: &Session) -> Vec<AchievementId> {
    session.profile().achievements.iter().map(|a| a.id).collect()
}

fn announce_new_achievements(session: &Session, before: &[AchievementId]) {
    for a in &session.profile().achievements {
        if !before.contains(&a.id) {
            println!("Achievement unlocked: {} — {}", a.title, a.description);
        }
    }
}

fn complete_and_report(session: &mut Session, store: &FileStore, id: &str) -> Result<()> {
    let before = earned_ids(session);
    let name = session
        .activity(id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|| id.to_string());

    let credited = session.complete_activity(id, Utc::now())?;
    store.save(&session.snapshot())?;

    println!(
        "{name} complete — {credited} cal credited ({}/{} today)",
        session.daily_progress(),
        session.daily_goal()
    );
    if session.daily_progress() >= session.daily_goal() {
        println!("You've reached your daily calorie burn goal!");
    }
    announce_new_achievements(session, &before);
    Ok(())
}

fn print_profile(session: &Session) {
    let p = session.profile();
    println!("{}", p.name);
    if !p.bio.is_empty() {
        println!("{}", p.bio);
    }
    if !p.avatar.is_empty() {
        println!("Avatar: {}", p.avatar);
    }
    println!();

    match &p.bmi {
        Some(bmi) => println!(
            "BMI: {:.1} ({}) — {}kg, {}cm, {}y",
            bmi.value,
            bmi.category.label(),
            bmi.weight_kg,
            bmi.height_cm,
            bmi.age_years
        ),
        None => println!("BMI: not calculated yet"),
    }
    println!("Goal tier: {}", p.goal.label());
    println!("Daily burn goal: {} cal", p.daily_calorie_goal);
    println!(
        "Achievements: {} of {} unlocked",
        p.achievements.len(),
        ACHIEVEMENT_CATALOG.len()
    );
}

fn print_catalog(session: &Session) {
    println!("Activity catalog:");
    for template in &ACTIVITY_TEMPLATES {
        let taken = session.activities().iter().any(|a| a.name == template.name);
        let marker = if taken { " (already added)" } else { "" };
        println!(
            "  {:<15} {:>2} cal/min{marker}",
            template.name, template.calories_per_minute
        );
    }
}

fn print_activities(session: &Session, config: &Config) {
    let activities = session.activities();
    if activities.is_empty() {
        println!("No activities yet — `fittrack activity add <name>` to start.");
        return;
    }

    println!("Today's activities:");
    for a in activities {
        match a.completed_at {
            Some(at) => println!(
                "  [{}] {:<15} {:>4} cal  done {}",
                a.id,
                a.name,
                a.allocated_calories,
                format_local(at, &config.display.timezone)
            ),
            None => println!(
                "  [{}] {:<15} {:>4} cal  {:>3} min pending",
                a.id, a.name, a.allocated_calories, a.required_minutes
            ),
        }
    }
    print_progress(session);
}

fn print_achievements(session: &Session, config: &Config) {
    let earned = &session.profile().achievements;
    println!(
        "Achievements: {} of {} unlocked",
        earned.len(),
        ACHIEVEMENT_CATALOG.len()
    );
    for spec in &ACHIEVEMENT_CATALOG {
        match earned.iter().find(|a| a.id == spec.id) {
            Some(a) => println!(
                "  [x] {:<17} {}  (earned {})",
                spec.title,
                spec.description,
                format_local(a.date_earned, &config.display.timezone)
            ),
            None => println!("  [ ] {:<17} {}", spec.title, spec.description),
        }
    }
}

fn print_progress(session: &Session) {
    let progress = session.daily_progress();
    let goal = session.daily_goal();
    let pct = if goal == 0 {
        0.0
    } else {
        f64::from(progress) * 100.0 / f64::from(goal)
    };
    println!("Progress: {progress}/{goal} cal ({pct:.0}%)");
}
