//! # Storage Layer
//!
//! Persisted state is three record sets, owners, attribute definitions and
//! attribute values, held together in one [`Records`] snapshot. Values carry
//! foreign keys to both other sets.
//!
//! ## Atomic Mutations
//!
//! Every mutating operation follows the same shape:
//!
//! 1. Load a snapshot via [`DataStore::load`].
//! 2. Mutate the in-memory copy, including any cascade.
//! 3. Persist it with a single [`DataStore::commit`].
//!
//! A failure anywhere before step 3 leaves storage untouched, and because the
//! whole snapshot is written at once a cascade can never be half-applied
//! (definition gone, stale values left behind). See
//! [`crate::commands::helpers::transact`].
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: JSON snapshot on disk, written atomically.
//! - [`memory::InMemoryStore`]: for testing logic without filesystem I/O.
//!
//! Column preferences live outside this consistency boundary, behind the
//! [`prefs::PreferenceStore`] key-value interface.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── data.json           # Records snapshot
//! ├── preferences.json    # Client-scoped preferences
//! └── roster.toml         # Optional configuration
//! ```

use crate::error::Result;

pub mod backend;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;
pub mod prefs;
pub mod record_store;
pub mod records;

pub use records::Records;

/// Report from the `doctor` operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Values whose owner or definition no longer exists
    pub removed_orphan_values: usize,
    /// Id sequences that lagged behind existing ids
    pub fixed_sequences: usize,
}

/// Abstract interface for record storage.
pub trait DataStore {
    /// Load the current snapshot of all record sets.
    fn load(&self) -> Result<Records>;

    /// Replace the persisted snapshot in one write.
    fn commit(&mut self, records: &Records) -> Result<()>;

    /// Verify and fix referential consistency issues.
    fn doctor(&mut self) -> Result<DoctorReport>;
}
