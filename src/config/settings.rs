//! Bot settings loaded from `config.toml` and the environment.
//!
//! Every value has a default so the bot runs without a config file. Values from
//! the file are overridden by `NAVI_*` environment variables, which are usually
//! provided through `.env`.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};

const DEFAULT_INTERACTION_TIMEOUT_SECS: u64 = 300;
const DEFAULT_EMBED_COLOR: u32 = 0x008C_8A89;

/// Settings shared by all commands and views.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Seconds of inactivity after which an interactive view times out
    pub interaction_timeout_secs: u64,
    /// Color used for every embed the bot sends
    pub embed_color: u32,
    /// Show unclassified command errors to every user
    pub debug_mode: bool,
    /// Discord user IDs that always see unclassified command errors
    pub dev_ids: Vec<u64>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            interaction_timeout_secs: DEFAULT_INTERACTION_TIMEOUT_SECS,
            embed_color: DEFAULT_EMBED_COLOR,
            debug_mode: false,
            dev_ids: Vec::new(),
        }
    }
}

impl BotConfig {
    /// Timeout applied to interactive views.
    #[must_use]
    pub const fn interaction_timeout(&self) -> Duration {
        Duration::from_secs(self.interaction_timeout_secs)
    }

    /// Whether `user_id` belongs to a developer.
    #[must_use]
    pub fn is_dev(&self, user_id: u64) -> bool {
        self.dev_ids.contains(&user_id)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config {
            message: format!("Failed to parse config.toml: {e}"),
        })
    }

    /// Applies overrides from an environment lookup function.
    ///
    /// Takes the lookup as a parameter so tests don't have to touch the
    /// process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("NAVI_INTERACTION_TIMEOUT") {
            self.interaction_timeout_secs = value.trim().parse().map_err(|e| Error::Config {
                message: format!("NAVI_INTERACTION_TIMEOUT must be a number of seconds: {e}"),
            })?;
        }
        if let Some(value) = lookup("NAVI_DEBUG_MODE") {
            self.debug_mode = matches!(
                value.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(value) = lookup("NAVI_DEV_IDS") {
            self.dev_ids = parse_id_list(&value)?;
        }
        Ok(())
    }
}

/// Parses a comma separated list of Discord user IDs.
fn parse_id_list(value: &str) -> Result<Vec<u64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u64>().map_err(|e| Error::Config {
                message: format!("Invalid user id '{id}' in NAVI_DEV_IDS: {e}"),
            })
        })
        .collect()
}

/// Loads settings from a TOML file (if it exists) and applies environment overrides.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed, or if an
/// override has an invalid value.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BotConfig> {
    let path_ref = path.as_ref();
    let mut config = if path_ref.exists() {
        tracing::debug!("Loading configuration from {:?}", path_ref);
        let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
            message: format!("Failed to read config file {path_ref:?}: {e}"),
        })?;
        BotConfig::from_toml(&contents)?
    } else {
        tracing::info!("No config file at {:?}, using defaults", path_ref);
        BotConfig::default()
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Loads settings from the default location (./config.toml)
pub fn load_default_config() -> Result<BotConfig> {
    load_config("config.toml")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_partial_config_keeps_defaults() {
        let config = BotConfig::from_toml(
            r"
            interaction_timeout_secs = 60
            dev_ids = [123, 456]
            ",
        )
        .unwrap();

        assert_eq!(config.interaction_timeout(), Duration::from_secs(60));
        assert_eq!(config.embed_color, DEFAULT_EMBED_COLOR);
        assert!(!config.debug_mode);
        assert!(config.is_dev(456));
        assert!(!config.is_dev(789));
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = BotConfig::from_toml("interaction_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_environment_overrides() {
        let env: HashMap<&str, &str> = [
            ("NAVI_INTERACTION_TIMEOUT", "45"),
            ("NAVI_DEBUG_MODE", "true"),
            ("NAVI_DEV_IDS", "1, 2,,3"),
        ]
        .into_iter()
        .collect();

        let mut config = BotConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.interaction_timeout_secs, 45);
        assert!(config.debug_mode);
        assert_eq!(config.dev_ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_dev_id_override() {
        let mut config = BotConfig::default();
        let result = config.apply_overrides(|key| {
            (key == "NAVI_DEV_IDS").then(|| "12,abc".to_string())
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config.embed_color, DEFAULT_EMBED_COLOR);
    }
}
