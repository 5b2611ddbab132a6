//! Console settings

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use dial_sim::SaveState;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Persisted console settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Receiver config file; built-in game data when unset
    #[serde(default)]
    pub config_path: Option<PathBuf>,
    /// Items the player holds
    #[serde(default = "default_owned_items")]
    pub owned_items: Vec<String>,
    /// Last saved frequency in MHz
    #[serde(default)]
    pub frequency: Option<f64>,
    /// Equipped items and component levels
    #[serde(default)]
    pub state: SaveState,
}

fn default_owned_items() -> Vec<String> {
    vec!["radio_basic".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            owned_items: default_owned_items(),
            frequency: None,
            state: SaveState::default(),
        }
    }
}

impl Settings {
    /// `$XDG_CONFIG_HOME/dialscan` when it is absolute, else `~/.config/dialscan`
    fn config_dir() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|base| base.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|base| base.join("dialscan"))
    }

    /// Location of the settings file
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.json"))
    }

    /// Load from the settings file, falling back to defaults
    pub fn load() -> Self {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => {
                warn!("No home directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`
    ///
    /// A missing file gives defaults. An unreadable or corrupt file also
    /// gives defaults, with a warning since saved equipment is lost.
    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!(
                "Settings {} are corrupt, saved equipment was reset: {}",
                path.display(),
                e
            );
            Self::default()
        })
    }

    /// Write to the settings file
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::settings_path().context("could not determine settings path")?;
        self.save_to(&path)
    }

    /// Write to `path`, creating its directory
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("serializing settings")?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}
