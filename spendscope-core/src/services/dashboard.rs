//! Dashboard assembly - greeting, card summaries, top payments and quotes

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use super::analysis::AnalysisService;
use super::quotes::QuoteService;
use super::ranking::DEFAULT_TOP_N;
use crate::config::UserSettings;
use crate::domain::dates::parse_reference_date;
use crate::domain::result::Result;
use crate::domain::{CardSummary, CurrencyRate, StockPrice, TopTransaction, TransactionRecord};

pub const TRANSACTIONS_ERROR_TEXT: &str = "Не удалось получить данные о транзакциях";
pub const EMPTY_WINDOW_TEXT: &str = "Данные о транзакциях за период отсутствуют";

/// Summary shown on the main page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions_notice: Option<String>,
}

/// Greeting for a local hour of day
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        6..=10 => "Доброе утро!",
        11..=16 => "Добрый день!",
        17..=22 => "Добрый вечер!",
        _ => "Доброй ночи!",
    }
}

pub struct DashboardService<'a> {
    analysis: &'a AnalysisService,
    quotes: &'a QuoteService,
}

impl<'a> DashboardService<'a> {
    pub fn new(analysis: &'a AnalysisService, quotes: &'a QuoteService) -> Self {
        Self { analysis, quotes }
    }

    /// Build the dashboard for `reference_date` (`DD.MM.YYYY`)
    ///
    /// `records` is the outcome of loading the export. A load failure or an
    /// empty month is reported inside the dashboard; quotes are fetched
    /// either way. Only an unparsable reference date is an error.
    pub fn assemble(
        &self,
        records: Result<Vec<TransactionRecord>>,
        reference_date: &str,
        now: NaiveDateTime,
        settings: &UserSettings,
    ) -> Result<Dashboard> {
        let mut dashboard = Dashboard {
            greeting: greeting(now.hour()).to_string(),
            cards: Vec::new(),
            top_transactions: Vec::new(),
            currency_rates: Vec::new(),
            stock_prices: Vec::new(),
            transactions_error: None,
            transactions_notice: None,
        };

        match records {
            Ok(records) => {
                let window = self.analysis.filter_month(&records, reference_date)?;
                if window.is_empty() {
                    dashboard.transactions_notice = Some(EMPTY_WINDOW_TEXT.to_string());
                } else {
                    let groups = self.analysis.group_by_card(&window);
                    dashboard.cards = self.analysis.card_info(&groups);
                    dashboard.top_transactions =
                        self.analysis.top_transactions(&window, DEFAULT_TOP_N);
                }
            }
            Err(_) => {
                parse_reference_date(reference_date)?;
                dashboard.transactions_error = Some(TRANSACTIONS_ERROR_TEXT.to_string());
            }
        }

        dashboard.currency_rates = self
            .quotes
            .currency_rates(&settings.user_currencies, &settings.user_main_currency);
        dashboard.stock_prices = self.quotes.stock_prices(&settings.user_stocks);

        Ok(dashboard)
    }
}
