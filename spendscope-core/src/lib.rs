//! Spendscope Core - analysis of personal bank-account exports
//!
//! This crate implements the core logic following hexagonal architecture:
//!
//! - **domain**: Transaction records, derived views and the error taxonomy
//! - **ports**: Trait definitions for external collaborators (RecordSource, QuoteProvider, ReportSink)
//! - **services**: Analysis engines and the services that orchestrate them
//! - **adapters**: Concrete implementations (spreadsheet files, Twelve Data, JSON report)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::json_report::JsonFileReport;
use adapters::spreadsheet::SpreadsheetSource;
use adapters::twelvedata::TwelveDataProvider;
use config::Config;
use ports::{QuoteProvider, RecordSource};
use services::*;

// Re-export commonly used types at crate root
pub use config::UserSettings;
pub use domain::result::{Error, OperationResult};
pub use domain::{
    CardKey, CardSummary, CurrencyRate, QuoteValue, SearchOutcome, StockPrice, TopTransaction,
    TransactionRecord,
};
pub use services::{Dashboard, EntryPoint, LogEvent, LoggingService, PhoneBoundary, SaveOutcome};

/// Main context for Spendscope operations
///
/// Holds the configuration, the process-wide logger and every service for
/// one invocation.
pub struct SpendscopeContext {
    pub config: Config,
    pub logger: Option<Arc<LoggingService>>,
    pub analysis_service: AnalysisService,
    pub quote_service: QuoteService,
    pub report_service: ReportService,
}

impl SpendscopeContext {
    /// Create a context for a data directory
    ///
    /// `logger` may be `None` when the log store cannot be opened; nothing
    /// else depends on it.
    pub fn new(data_dir: &Path, logger: Option<Arc<LoggingService>>) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let provider: Option<Box<dyn QuoteProvider>> = match &config.quote_api_key {
            Some(key) => Some(Box::new(TwelveDataProvider::connect(key, &config.quote_base_url)?)),
            None => None,
        };

        let analysis_service = AnalysisService::new(logger.clone());
        let quote_service = QuoteService::new(provider, logger.clone());
        let report_service = ReportService::new(
            Box::new(JsonFileReport::new(config.report_path())),
            logger.clone(),
        );

        Ok(Self {
            config,
            logger,
            analysis_service,
            quote_service,
            report_service,
        })
    }

    /// Record source for an explicit file, or the configured default export
    pub fn record_source(&self, file: Option<&Path>) -> SpreadsheetSource {
        match file {
            Some(path) => SpreadsheetSource::new(path),
            None => SpreadsheetSource::new(self.config.transactions_path()),
        }
    }

    /// Load records, logging the outcome
    pub fn load_records(&self, source: &dyn RecordSource) -> domain::result::Result<Vec<TransactionRecord>> {
        let result = source.load();
        let event = match &result {
            Ok(records) => LogEvent::new("records_loaded")
                .with_component("records")
                .with_record_count(records.len()),
            Err(e) => LogEvent::new("records_unavailable")
                .with_component("records")
                .with_error(e.kind())
                .with_error_details(e.to_string()),
        };
        logging::emit(self.logger.as_deref(), event);
        result
    }

    /// Dashboard assembly over this context's services
    pub fn dashboard(&self) -> DashboardService<'_> {
        DashboardService::new(&self.analysis_service, &self.quote_service)
    }
}
