//! Application settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use ant_switch::{AntennaCount, SwitchConfig, DEFAULT_DEBOUNCE};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cli::Cli;

/// Persisted controller settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Number of antennas (2 or 3)
    #[serde(default)]
    pub antenna_count: AntennaCount,
    /// Button debounce in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Use simulated hardware
    #[serde(default)]
    pub simulate: bool,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE.as_millis() as u64
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            antenna_count: AntennaCount::default(),
            debounce_ms: default_debounce_ms(),
            simulate: false,
        }
    }
}

impl Settings {
    /// Get the XDG config directory for antennactl
    /// Uses $XDG_CONFIG_HOME/antennactl, falls back to ~/.config/antennactl
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("antennactl"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("antennactl"))
    }

    /// Default settings file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from `path`, or the default location
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_json(&text).unwrap_or_else(|e| {
                warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                debug!("No settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings from JSON
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Save settings to `path`, or the default location
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(Self::default_path)
            .context("could not determine settings path")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }

    /// Override settings with any flags given on the command line
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(count) = cli.mode {
            self.antenna_count = count;
        }
        if let Some(ms) = cli.debounce_ms {
            self.debounce_ms = ms;
        }
        if cli.simulate {
            self.simulate = true;
        }
    }

    /// Switch configuration for these settings
    pub fn switch_config(&self) -> SwitchConfig {
        SwitchConfig {
            debounce: Duration::from_millis(self.debounce_ms),
            ..SwitchConfig::new(self.antenna_count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.antenna_count, AntennaCount::Three);
        assert_eq!(settings.debounce_ms, 200);
        assert!(!settings.simulate);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "antenna_count": 2 }"#).unwrap();
        assert_eq!(settings.antenna_count, AntennaCount::Two);
        assert_eq!(settings.debounce_ms, 200);
    }

    #[test]
    fn test_invalid_count_rejected() {
        assert!(Settings::from_json(r#"{ "antenna_count": 5 }"#).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut settings = Settings::from_json(r#"{ "antenna_count": 2, "debounce_ms": 50 }"#)
            .unwrap();
        let cli = Cli::try_parse_from(["antennactl", "--mode", "3", "--simulate"]).unwrap();
        settings.apply(&cli);

        assert_eq!(settings.antenna_count, AntennaCount::Three);
        assert_eq!(settings.debounce_ms, 50);
        assert!(settings.simulate);
    }

    #[test]
    fn test_switch_config() {
        let settings = Settings {
            antenna_count: AntennaCount::Two,
            debounce_ms: 120,
            simulate: false,
        };
        let config = settings.switch_config();
        assert_eq!(config.antenna_count, AntennaCount::Two);
        assert_eq!(config.debounce, Duration::from_millis(120));
        assert_eq!(config.relay_pins(), &[27, 22]);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("antennactl-test-{}", std::process::id()))
            .join("settings.json");
        let settings = Settings {
            antenna_count: AntennaCount::Two,
            debounce_ms: 300,
            simulate: true,
        };

        let written = settings.save(Some(&path)).unwrap();
        assert_eq!(written, path);
        assert_eq!(Settings::load(Some(&path)), settings);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("antennactl-does-not-exist/settings.json");
        assert_eq!(Settings::load(Some(&path)), Settings::default());
    }
}
