use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_fittrack_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySection {
    /// IANA timezone used to render completion and earned timestamps.
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplaySection {
                timezone: "UTC".to_string(),
            },
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_fittrack_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    Ok(config)
}

/// Format a UTC timestamp in the configured display timezone; falls back to
/// UTC when the configured name does not parse.
pub fn format_local(dt: DateTime<Utc>, tz_name: &str) -> String {
    match tz_name.parse::<Tz>() {
        Ok(tz) => dt.with_timezone(&tz).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => dt.format("%Y-%m-%d %H:%M UTC").to_string(),
    }
}
