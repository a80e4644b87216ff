use super::backend::StorageBackend;
use super::Records;
use crate::error::{Result, RosterError};
use std::cell::RefCell;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is used from a
/// single thread per request. This keeps the `StorageBackend` trait on `&self`
/// for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Records>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Records> {
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &Records) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = records.clone();
        Ok(())
    }
}
