//! Settings file for the converter host.
//!
//! Settings are read from an optional TOML file. Every section and key is
//! optional:
//!
//! ```toml
//! [logging]
//! level = "debug"
//! file = "converter.log"
//!
//! [converter]
//! clamp_policy = "both"        # or "deposit_only" (default)
//!
//! [listing]
//! min_deposit = "500000000"
//! max_deposit = "900000000"
//! monthly_rent = "3000000"
//! is_price_convertible = true
//! ```

use std::path::{Path, PathBuf};

use rent_core::{ClampPolicy, ListingPrice};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterSettings {
    pub clamp_policy: ClampPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub converter: ConverterSettings,
    pub listing: Option<ListingPrice>,
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
