//! Analysis service - the engines behind one logger
//!
//! Every call records one event naming the engine and the size of its result.
//! The engines themselves stay pure; this is the only place they meet I/O.

use std::sync::Arc;

use chrono::NaiveDateTime;

use super::cards::{card_info, group_by_card};
use super::category::{spending_by_category, spending_by_category_at};
use super::logging::{emit, LogEvent, LogLevel, LoggingService};
use super::ranking::top_transactions;
use super::search::{search_by_keyword, search_by_phone, PhoneBoundary};
use super::window::try_filter_month;
use crate::domain::result::{Error, Result};
use crate::domain::{CardGroup, CardSummary, SearchOutcome, TopTransaction, TransactionRecord};

/// Analysis engines with call-scoped logging
pub struct AnalysisService {
    logger: Option<Arc<LoggingService>>,
}

impl AnalysisService {
    pub fn new(logger: Option<Arc<LoggingService>>) -> Self {
        Self { logger }
    }

    /// Service that logs nothing
    pub fn unlogged() -> Self {
        Self { logger: None }
    }

    fn record(&self, event: &str, count: usize) {
        emit(
            self.logger.as_deref(),
            LogEvent::new(event)
                .with_component("analysis")
                .with_record_count(count),
        );
    }

    fn record_failure(&self, event: &str, err: &Error) {
        emit(
            self.logger.as_deref(),
            LogEvent::new(event)
                .with_component("analysis")
                .with_error(err.kind())
                .with_error_details(err.to_string())
                .with_level(LogLevel::Warning),
        );
    }

    /// Records of the reference date's month up to that date
    ///
    /// Unlike the bare filter, an unparsable date is reported.
    pub fn filter_month(
        &self,
        records: &[TransactionRecord],
        reference_date: &str,
    ) -> Result<Vec<TransactionRecord>> {
        match try_filter_month(records, reference_date) {
            Ok(window) => {
                self.record("month_filtered", window.len());
                Ok(window)
            }
            Err(e) => {
                self.record_failure("month_filter_failed", &e);
                Err(e)
            }
        }
    }

    /// Category spending over the trailing three months
    pub fn spending_by_category(
        &self,
        records: &[TransactionRecord],
        category: &str,
        as_of: Option<&str>,
    ) -> Result<Vec<TransactionRecord>> {
        match spending_by_category(records, category, as_of) {
            Ok(report) => {
                self.record("category_report_built", report.len());
                Ok(report)
            }
            Err(e) => {
                self.record_failure("category_report_failed", &e);
                Err(e)
            }
        }
    }

    /// Category spending with an explicit window end
    pub fn spending_by_category_at(
        &self,
        records: &[TransactionRecord],
        category: &str,
        end: NaiveDateTime,
    ) -> Vec<TransactionRecord> {
        let report = spending_by_category_at(records, category, end);
        self.record("category_report_built", report.len());
        report
    }

    pub fn search_by_keyword(
        &self,
        records: &[TransactionRecord],
        keyword: &str,
    ) -> Result<SearchOutcome> {
        let outcome = search_by_keyword(records, keyword)?;
        self.record("keyword_search", outcome.records().len());
        Ok(outcome)
    }

    pub fn search_by_phone(
        &self,
        records: &[TransactionRecord],
        boundary: PhoneBoundary,
    ) -> SearchOutcome {
        let outcome = search_by_phone(records, boundary);
        self.record("phone_search", outcome.records().len());
        outcome
    }

    pub fn group_by_card(&self, records: &[TransactionRecord]) -> Vec<CardGroup> {
        let groups = group_by_card(records);
        self.record("cards_grouped", groups.len());
        groups
    }

    pub fn card_info(&self, groups: &[CardGroup]) -> Vec<CardSummary> {
        card_info(groups)
    }

    pub fn top_transactions(&self, records: &[TransactionRecord], n: usize) -> Vec<TopTransaction> {
        let top = top_transactions(records, n);
        self.record("top_ranked", top.len());
        top
    }
}
