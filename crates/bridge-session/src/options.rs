//! Importer configuration.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when `Event`, `Site`, `Date` or `Scoring` show up again with a
/// different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetadataPolicy {
    FirstWriteWins,
    #[default]
    LastWriteWins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportOptions {
    pub metadata: MetadataPolicy,
    /// Keep games whose auction never closed instead of dropping them.
    pub keep_open_auctions: bool,
    /// Reject played cards that were dealt to another seat.
    pub check_card_ownership: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            metadata: MetadataPolicy::default(),
            keep_open_auctions: false,
            check_card_ownership: true,
        }
    }
}

impl ImportOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}
