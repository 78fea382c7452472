// store/mod.rs
use std::sync::RwLock;

use crate::domain::Report;
use crate::errors::ServerError;

pub mod images;

pub use images::{ImageStore, StoredImage};

/// Append-only collection of accepted reports, read back newest first.
pub trait ReportStore: Send + Sync {
    fn append(&self, report: Report) -> Result<(), ServerError>;

    /// Most recently appended first.
    fn list(&self) -> Result<Vec<Report>, ServerError>;

    fn len(&self) -> Result<usize, ServerError>;

    fn contains(&self, id: &str) -> Result<bool, ServerError> {
        Ok(self.list()?.iter().any(|r| r.id == id))
    }
}

/// Reports kept in process memory, lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for MemoryStore {
    fn append(&self, report: Report) -> Result<(), ServerError> {
        let mut reports = self
            .reports
            .write()
            .map_err(|_| ServerError::InternalError)?;
        reports.insert(0, report);
        Ok(())
    }

    fn list(&self) -> Result<Vec<Report>, ServerError> {
        let reports = self.reports.read().map_err(|_| ServerError::InternalError)?;
        Ok(reports.clone())
    }

    fn len(&self) -> Result<usize, ServerError> {
        let reports = self.reports.read().map_err(|_| ServerError::InternalError)?;
        Ok(reports.len())
    }

    fn contains(&self, id: &str) -> Result<bool, ServerError> {
        let reports = self.reports.read().map_err(|_| ServerError::InternalError)?;
        Ok(reports.iter().any(|r| r.id == id))
    }
}
