use crate::domain::ListTab;
use crate::ticker::DEFAULT_POLL_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::warn;

const APP_DIR: &str = "ticktodo";
const CONFIG_FILE: &str = "config.json";
const MIN_POLL_INTERVAL_MS: u64 = 50;
const MAX_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Event poll timeout; also bounds how late a timer tick can render
    pub poll_interval_ms: u64,
    /// Tab shown on startup: todo, done or deleted
    pub default_tab: String,
    pub show_created_at: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_MS,
            default_tab: ListTab::Todo.name().to_string(),
            show_created_at: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Get the config file path (~/.config/ticktodo/config.json)
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Some(path)
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from_path(&path),
            None => Self::default(),
        }
    }

    /// Load settings, falling back to defaults on a missing or broken file
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Self>(&contents) {
                Ok(mut settings) => {
                    settings.validate();
                    settings
                }
                Err(error) => {
                    warn!("failed to parse config '{}': {}", path.display(), error);
                    Self::default()
                }
            },
            Err(error) => {
                warn!("failed to read config '{}': {}", path.display(), error);
                Self::default()
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let parent = path.parent().context("Config path has no parent directory")?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;

        let mut validated = self.clone();
        validated.validate();
        let json = serde_json::to_string_pretty(&validated).context("Failed to serialize settings")?;
        atomic_write(path, &json)
    }

    /// Write a default config unless one already exists; returns its path
    pub fn init_default() -> Result<PathBuf> {
        let path = Self::config_path().context("Unable to determine config directory")?;
        if !path.exists() {
            Self::default().save_to_path(&path)?;
        }
        Ok(path)
    }

    /// Tab to open on startup
    pub fn start_tab(&self) -> ListTab {
        ListTab::from_name(&self.default_tab).unwrap_or_default()
    }

    fn validate(&mut self) {
        self.poll_interval_ms = self
            .poll_interval_ms
            .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);

        self.default_tab = match ListTab::from_name(&self.default_tab) {
            Some(tab) => tab.name().to_string(),
            None => {
                warn!("invalid default_tab '{}'; falling back to todo", self.default_tab);
                ListTab::Todo.name().to_string()
            }
        };

        self.log_level = self.log_level.trim().to_ascii_lowercase();
    }
}

/// Atomically write content to a file (write to temp, then rename)
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().context("File path has no parent directory")?;

    let mut temp_file = NamedTempFile::new_in(dir).context("Failed to create temporary file")?;
    temp_file
        .write_all(content.as_bytes())
        .context("Failed to write to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to sync temporary file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist file: {}", path.display()))?;

    Ok(())
}
