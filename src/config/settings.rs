use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tracking::DEFAULT_LOOKBACK_DAYS;

fn default_emoji() -> String {
    "🏃".to_string()
}
fn default_scale_range() -> i32 {
    10
}
fn default_mark_window_days() -> u32 {
    7
}
fn default_streak_lookback_days() -> u32 {
    DEFAULT_LOOKBACK_DAYS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDefaults {
    #[serde(default = "default_emoji")]
    pub default_emoji: String,
    /// Used for scalable habits created without `--scale`
    #[serde(default = "default_scale_range")]
    pub default_scale_range: i32,
}

impl Default for HabitDefaults {
    fn default() -> Self {
        Self {
            default_emoji: default_emoji(),
            default_scale_range: default_scale_range(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// How many days back (today included) a record may be marked.
    #[serde(default = "default_mark_window_days")]
    pub mark_window_days: u32,
    #[serde(default = "default_streak_lookback_days")]
    pub streak_lookback_days: u32,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            mark_window_days: default_mark_window_days(),
            streak_lookback_days: default_streak_lookback_days(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub habits: HabitDefaults,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "habita")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("habita.db"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
