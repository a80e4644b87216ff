use super::Records;
use crate::error::Result;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (consistency repair, doctor).
pub trait StorageBackend {
    /// Load the records snapshot. A store that was never written yields an
    /// empty snapshot.
    fn load_records(&self) -> Result<Records>;

    /// Persist the records snapshot.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a
    /// partially written snapshot.
    fn save_records(&self, records: &Records) -> Result<()>;
}
