use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{load_document, SettingsError};
use crate::constants::{AUTO_SELECT, DEFAULT_TEST_INTERVAL, DEFAULT_TEST_URL};

fn default_test_url() -> String {
    DEFAULT_TEST_URL.to_string()
}

fn default_test_interval() -> u32 {
    DEFAULT_TEST_INTERVAL
}

fn default_fallback_group() -> String {
    AUTO_SELECT.to_string()
}

/// Tunables for building and rendering subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Probe URL of latency-tested groups
    #[serde(default = "default_test_url")]
    pub test_url: String,
    /// Probe interval in seconds
    #[serde(default = "default_test_interval")]
    pub test_interval: u32,
    /// Default group name used when no rule group is marked default
    #[serde(default = "default_fallback_group")]
    pub fallback_default_group: String,
    /// UTC offset used to display expiry times
    pub expire_utc_offset_hours: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            test_url: default_test_url(),
            test_interval: default_test_interval(),
            fallback_default_group: default_fallback_group(),
            expire_utc_offset_hours: 0,
        }
    }
}

impl Settings {
    /// Load settings from a `.toml`, `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load_document(path.as_ref())
    }

    /// Load settings from content, trying TOML first and YAML otherwise.
    pub fn from_content(content: &str) -> Result<Self, SettingsError> {
        if toml::from_str::<toml::Value>(content).is_ok() {
            return Ok(toml::from_str(content)?);
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.test_url, "http://www.gstatic.com/generate_204");
        assert_eq!(settings.test_interval, 300);
        assert_eq!(settings.fallback_default_group, "Auto Select");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_content("test_interval = 600\n").unwrap();
        assert_eq!(settings.test_interval, 600);
        assert_eq!(settings.test_url, DEFAULT_TEST_URL);
    }

    #[test]
    fn test_yaml_content() {
        let settings =
            Settings::from_content("test_url: https://cp.cloudflare.com\nexpire_utc_offset_hours: 8\n")
                .unwrap();
        assert_eq!(settings.test_url, "https://cp.cloudflare.com");
        assert_eq!(settings.expire_utc_offset_hours, 8);
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(Settings::from_content("").unwrap(), Settings::default());
    }
}
