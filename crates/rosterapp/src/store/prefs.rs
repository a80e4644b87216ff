//! Client-scoped key-value preferences.
//!
//! Preferences sit outside the [`Records`](super::Records) snapshot: losing or
//! corrupting one never affects owner data, and callers treat a read failure
//! as "no preference stored".

use super::fs_backend::write_atomic;
use crate::error::{Result, RosterError};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PREFERENCES_FILE: &str = "preferences.json";

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences held in memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemPreferences {
    entries: BTreeMap<String, String>,
    simulate_read_error: RefCell<bool>,
}

impl MemPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }
}

impl PreferenceStore for MemPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(RosterError::Store("Simulated read error".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences kept as a flat JSON object in `preferences.json`.
pub struct FsPreferences {
    root: PathBuf,
}

impl FsPreferences {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn file(&self) -> PathBuf {
        self.root.join(PREFERENCES_FILE)
    }

    fn load_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.file();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PreferenceStore for FsPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.load_all()?;
        debug!(key, found = entries.contains_key(key), "read preference");
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // A corrupt file is replaced rather than blocking the write
        let mut entries = self.load_all().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.root, &self.file(), &content)
    }
}
