use super::backend::StorageBackend;
use super::Records;
use crate::error::{Result, RosterError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const DATA_FILE: &str = "data.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }
}

/// Write `content` to `path` via a uniquely named tmp file and a rename, so
/// the target is either the old or the new content, never a mix.
pub(crate) fn write_atomic(root: &Path, path: &Path, content: &str) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root).map_err(RosterError::Io)?;
    }
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    let tmp_file = root.join(format!(".{}-{}.tmp", stem, Uuid::new_v4()));
    fs::write(&tmp_file, content).map_err(RosterError::Io)?;
    fs::rename(&tmp_file, path).map_err(RosterError::Io)?;
    Ok(())
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Records> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(Records::default());
        }
        let content = fs::read_to_string(&data_file).map_err(RosterError::Io)?;
        let records: Records =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        debug!(path = %data_file.display(), "loaded records");
        Ok(records)
    }

    fn save_records(&self, records: &Records) -> Result<()> {
        let content =
            serde_json::to_string_pretty(records).map_err(RosterError::Serialization)?;
        write_atomic(&self.root, &self.data_file(), &content)
    }
}
