pub mod deserializer;
pub mod settings_struct;

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use settings_struct::Settings;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Read a TOML, YAML or JSON document, picking the format by extension.
/// Anything that is not `.toml` goes through the YAML parser, which also
/// accepts JSON.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, SettingsError> {
    let content = std::fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        Ok(toml::from_str(&content)?)
    } else {
        Ok(serde_yaml::from_str(&content)?)
    }
}
