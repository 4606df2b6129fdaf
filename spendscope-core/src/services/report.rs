//! Report service - persists the last category report

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use super::logging::{emit, LogEvent, LoggingService};
use crate::domain::TransactionRecord;
use crate::ports::ReportSink;

/// What happened to a report handed to [`ReportService::save`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// Empty reports are not written
    Skipped,
    Failed(String),
}

impl SaveOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

pub struct ReportService {
    sink: Box<dyn ReportSink>,
    logger: Option<Arc<LoggingService>>,
}

impl ReportService {
    pub fn new(sink: Box<dyn ReportSink>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { sink, logger }
    }

    /// Replace the stored report with `records`
    ///
    /// Write failures are logged and returned as a value.
    pub fn save(&self, records: &[TransactionRecord]) -> SaveOutcome {
        if records.is_empty() {
            return SaveOutcome::Skipped;
        }

        match self.sink.write(records) {
            Ok(path) => {
                emit(
                    self.logger.as_deref(),
                    LogEvent::new("report_saved")
                        .with_component("report")
                        .with_record_count(records.len()),
                );
                SaveOutcome::Saved(path)
            }
            Err(e) => {
                emit(
                    self.logger.as_deref(),
                    LogEvent::new("report_save_failed")
                        .with_component("report")
                        .with_error(e.to_string()),
                );
                SaveOutcome::Failed(e.to_string())
            }
        }
    }
}
