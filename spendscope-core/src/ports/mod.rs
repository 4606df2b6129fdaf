//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The analysis
//! engines depend only on these traits, not on concrete implementations.

mod quote_provider;
mod record_source;
mod report_sink;

pub use quote_provider::QuoteProvider;
pub use record_source::RecordSource;
pub use report_sink::ReportSink;
