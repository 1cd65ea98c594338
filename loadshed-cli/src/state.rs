use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

pub fn loadshed_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".loadshed"))
}

pub fn ensure_loadshed_home() -> Result<PathBuf> {
    let dir = loadshed_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// The last fetched raw payload, kept as a single file.
#[derive(Debug, Clone)]
pub struct PayloadCache {
    path: PathBuf,
}

impl PayloadCache {
    /// `~/.loadshed/machine_friendly.csv`
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(ensure_loadshed_home()?.join("machine_friendly.csv")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        Ok(Some(s))
    }

    pub fn write(&self, payload: &str) -> Result<()> {
        fs::write(&self.path, payload)
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }

    /// Age of the cached payload, `None` when there is no cache.
    pub fn age(&self) -> Result<Option<Duration>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .with_context(|| format!("stat {}", self.path.display()))?;
        // A clock that moved backwards counts as a fresh write.
        Ok(Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        ))
    }
}
