//! # Initialization
//!
//! Resolves where roster keeps its data, loads configuration from there, and
//! wires up the file-backed stores.
//!
//! ## Data Directory Resolution
//!
//! [`resolve_data_dir`] picks the first of:
//!
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `ROSTER_DATA` environment variable. Tests use this to isolate state.
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! ## Layout
//!
//! ```text
//! <data dir>/
//! ├── data.json           # owners, definitions, values
//! ├── preferences.json    # column preference
//! └── roster.toml         # optional configuration
//! ```

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::{debug, warn};

use crate::api::RosterApi;
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::store::fs::FileStore;
use crate::store::prefs::FsPreferences;

pub const DATA_ENV: &str = "ROSTER_DATA";

pub struct RosterContext {
    pub api: RosterApi<FileStore, FsPreferences>,
    pub config: RosterConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "roster", "roster")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| RosterError::Store("Could not determine data directory".to_string()))
}

/// Build the context for a data directory.
///
/// An unreadable `roster.toml` is reported and replaced by the defaults
/// rather than blocking every command.
pub fn initialize(data_override: Option<PathBuf>) -> Result<RosterContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = RosterConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring invalid configuration");
        RosterConfig::default()
    });
    debug!(data_dir = %data_dir.display(), "initialized roster");

    let store = FileStore::new(data_dir.clone());
    let prefs = FsPreferences::new(data_dir.clone());
    let api = RosterApi::new(store, prefs, config.clone());

    Ok(RosterContext {
        api,
        config,
        data_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use crate::model::NewOwner;
    use std::fs;

    #[test]
    fn test_override_wins() {
        let dir = PathBuf::from("/tmp/roster-explicit");
        assert_eq!(resolve_data_dir(Some(dir.clone())).unwrap(), dir);
    }

    #[test]
    fn test_initialize_with_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "page_size = 3\n").unwrap();

        let mut ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config.page_size, 3);
        assert_eq!(ctx.api.config().page_size, 3);
        assert_eq!(ctx.data_dir, dir.path());

        ctx.api.create_owner(NewOwner::named("Ana")).unwrap();
        assert!(dir.path().join("data.json").exists());
    }

    #[test]
    fn test_initialize_falls_back_on_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "page_size = [").unwrap();
        let ctx = initialize(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(ctx.config, RosterConfig::default());
    }
}
