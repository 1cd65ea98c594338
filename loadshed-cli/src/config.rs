use anyhow::{Context, Result};
use loadshed_core::StagePalette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_loadshed_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Where the machine-friendly schedule CSV is published.
    pub url: String,
    /// Cached payload younger than this is used without refetching.
    pub cache_ttl_minutes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// IANA zone the schedule's timestamps are written in; used to resolve "now".
    pub timezone: String,
    /// Stage palette, stage 1 first.
    pub emojis: Vec<String>,
    /// Show "Cape Town Area 15" instead of "city-of-cape-town-area-15".
    pub prettify: bool,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            url: "https://github.com/beyarkay/eskom-calendar/releases/download/latest/machine_friendly.csv"
                .to_string(),
            cache_ttl_minutes: 60,
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            timezone: "Africa/Johannesburg".to_string(),
            emojis: StagePalette::default().emojis,
            prettify: true,
        }
    }
}

impl DisplaySection {
    pub fn palette(&self) -> StagePalette {
        StagePalette::new(self.emojis.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_loadshed_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).context("parse config.toml")
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg: Config = toml::from_str("[display]\ntimezone = \"UTC\"\n").unwrap();
        assert_eq!(cfg.display.timezone, "UTC");
        assert!(cfg.display.prettify);
        assert_eq!(cfg.display.emojis.len(), 8);
        assert_eq!(cfg.source.cache_ttl_minutes, 60);
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.source.url, Config::default().source.url);
        assert_eq!(back.display.palette(), StagePalette::default());
    }
}
