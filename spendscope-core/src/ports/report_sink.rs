//! Report sink port - persistence of the last generated report

use std::path::PathBuf;

use crate::domain::result::Result;
use crate::domain::TransactionRecord;

/// Destination for report records
pub trait ReportSink: Send + Sync {
    /// Replace the stored report with `records`, returning where it went
    fn write(&self, records: &[TransactionRecord]) -> Result<PathBuf>;
}
