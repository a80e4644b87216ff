//! # Configuration
//!
//! Roster configuration is loaded with [`confique`], layered in priority
//! order:
//!
//! 1. **Environment variables**: `ROSTER_PAGE_SIZE`, `ROSTER_PLACEHOLDER`, etc.
//! 2. **Config file**: `roster.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `10` | Default grid page size |
//! | `preference_key` | `roster_selected_columns` | Key the column preference is stored under |
//! | `placeholder` | `-` | Shown for empty cells |
//! | `unnamed_artifact_label` | `Unnamed file` | Shown for uploads without a filename |
//! | `enforce_single_value` | `false` | Upsert instead of append on an existing (owner, attribute) pair |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::attributes::DisplayValue;
use crate::error::Result;

pub const CONFIG_FILE: &str = "roster.toml";

/// Configuration for roster, stored in `roster.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    /// Number of owners per grid page
    #[config(env = "ROSTER_PAGE_SIZE", default = 10)]
    pub page_size: usize,

    /// Identifier the column preference is persisted under
    #[config(env = "ROSTER_PREFERENCE_KEY", default = "roster_selected_columns")]
    pub preference_key: String,

    /// Text for cells with no value
    #[config(env = "ROSTER_PLACEHOLDER", default = "-")]
    pub placeholder: String,

    /// Text for image/file cells whose upload had no filename
    #[config(env = "ROSTER_UNNAMED_ARTIFACT_LABEL", default = "Unnamed file")]
    pub unnamed_artifact_label: String,

    /// Keep at most one value per (owner, attribute): creating another one
    /// overwrites the first instead of appending
    #[config(env = "ROSTER_ENFORCE_SINGLE_VALUE", default = false)]
    pub enforce_single_value: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            preference_key: "roster_selected_columns".to_string(),
            placeholder: DisplayValue::DEFAULT_PLACEHOLDER.to_string(),
            unnamed_artifact_label: DisplayValue::DEFAULT_UNNAMED_ARTIFACT.to_string(),
            enforce_single_value: false,
        }
    }
}

impl RosterConfig {
    /// Load from the environment and `<dir>/roster.toml`. A missing file is
    /// not an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let config = RosterConfig::builder()
            .env()
            .file(dir.join(CONFIG_FILE))
            .load()?;
        Ok(config)
    }

    /// Page size, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size.max(1)
    }

    /// The settings as `key = value` lines, in table order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page_size", self.page_size.to_string()),
            ("preference_key", self.preference_key.clone()),
            ("placeholder", self.placeholder.clone()),
            ("unnamed_artifact_label", self.unnamed_artifact_label.clone()),
            ("enforce_single_value", self.enforce_single_value.to_string()),
        ]
    }
}
