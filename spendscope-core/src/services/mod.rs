//! Service layer - analysis engines and their orchestration
//!
//! The engine modules (`window`, `category`, `search`, `cards`, `ranking`)
//! are pure functions over a record batch. The services around them add
//! logging, quote lookups and report persistence.

mod analysis;
pub mod cards;
pub mod category;
mod dashboard;
pub mod logging;
mod quotes;
pub mod ranking;
mod report;
pub mod search;
pub mod window;

pub use analysis::AnalysisService;
pub use cards::{card_info, group_by_card, summarize_cards};
pub use category::{category_total, spending_by_category, spending_by_category_at, REPORT_MONTHS};
pub use dashboard::{greeting, Dashboard, DashboardService, EMPTY_WINDOW_TEXT, TRANSACTIONS_ERROR_TEXT};
pub use logging::{EntryPoint, LogEntry, LogEvent, LogLevel, LoggingService};
pub use quotes::QuoteService;
pub use ranking::{top_transactions, DEFAULT_TOP_N};
pub use report::{ReportService, SaveOutcome};
pub use search::{search_by_keyword, search_by_phone, PhoneBoundary};
pub use window::{filter_month, try_filter_month, MonthWindow};
