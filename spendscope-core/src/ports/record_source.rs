//! Record source port - where transaction batches come from

use crate::domain::result::Result;
use crate::domain::TransactionRecord;

/// Supplier of one in-memory batch of transaction records
///
/// Implementations decode a concrete export format. A missing, unreadable or
/// empty supply is reported as `Error::RecordSourceUnavailable`.
pub trait RecordSource: Send + Sync {
    /// Load every record of the batch, in file order
    fn load(&self) -> Result<Vec<TransactionRecord>>;
}

/// Records already held in memory
impl RecordSource for Vec<TransactionRecord> {
    fn load(&self) -> Result<Vec<TransactionRecord>> {
        if self.is_empty() {
            return Err(crate::domain::result::Error::source_unavailable(
                "no transaction records supplied",
            ));
        }
        Ok(self.clone())
    }
}
