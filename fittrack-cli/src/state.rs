use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use fittrack_core::{SessionSnapshot, SessionStore};

pub fn fittrack_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".fittrack"))
}

pub fn ensure_fittrack_home() -> Result<PathBuf> {
    let dir = fittrack_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn session_path() -> Result<PathBuf> {
    Ok(ensure_fittrack_home()?.join("session.json"))
}

/// JSON-file session store under ~/.fittrack.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::new(session_path()?))
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&s)
            .with_context(|| format!("parse {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}
