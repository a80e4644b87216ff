use super::backend::StorageBackend;
use super::{DataStore, DoctorReport, Records};
use crate::error::Result;
use tracing::{info, warn};

pub struct RecordStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for RecordStore<B> {
    fn load(&self) -> Result<Records> {
        self.backend.load_records()
    }

    fn commit(&mut self, records: &Records) -> Result<()> {
        self.backend.save_records(records)
    }

    fn doctor(&mut self) -> Result<DoctorReport> {
        let mut records = self.backend.load_records()?;
        let report = DoctorReport {
            removed_orphan_values: records.remove_orphans(),
            fixed_sequences: records.repair_sequences(),
        };

        if report == DoctorReport::default() {
            info!("doctor: records are consistent");
            return Ok(report);
        }

        warn!(
            orphans = report.removed_orphan_values,
            sequences = report.fixed_sequences,
            "doctor: repaired records"
        );
        self.backend.save_records(&records)?;
        Ok(report)
    }
}
