//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Spreadsheet files (calamine / csv) for RecordSource
//! - Twelve Data HTTP client for QuoteProvider
//! - JSON file for ReportSink

pub mod json_report;
pub mod spreadsheet;
pub mod twelvedata;

#[cfg(test)]
pub mod twelvedata_mock;
