//! Quote service - dashboard currency rates and stock prices
//!
//! Instruments are fetched one at a time. A failed lookup becomes the
//! absent-data marker for that instrument and never stops the rest.

use std::sync::Arc;

use super::logging::{emit, LogEvent, LogLevel, LoggingService};
use crate::domain::result::{Error, Result};
use crate::domain::{round2, CurrencyRate, QuoteValue, StockPrice};
use crate::ports::QuoteProvider;

pub struct QuoteService {
    provider: Option<Box<dyn QuoteProvider>>,
    logger: Option<Arc<LoggingService>>,
}

impl QuoteService {
    /// Create a quote service; without a provider every quote is unavailable
    pub fn new(provider: Option<Box<dyn QuoteProvider>>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { provider, logger }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Rates of each currency against `main_currency`, in request order
    pub fn currency_rates(&self, currencies: &[String], main_currency: &str) -> Vec<CurrencyRate> {
        currencies
            .iter()
            .map(|currency| {
                let fetched = self.fetch(|p| p.exchange_rate(currency, main_currency));
                CurrencyRate {
                    currency: currency.clone(),
                    rate: self.settle("exchange_rate_unavailable", fetched),
                }
            })
            .collect()
    }

    /// Prices of each stock, rounded to cents, in request order
    pub fn stock_prices(&self, symbols: &[String]) -> Vec<StockPrice> {
        symbols
            .iter()
            .map(|symbol| {
                let fetched = self.fetch(|p| p.stock_price(symbol)).map(round2);
                StockPrice {
                    stock: symbol.clone(),
                    price: self.settle("stock_price_unavailable", fetched),
                }
            })
            .collect()
    }

    fn fetch(&self, lookup: impl FnOnce(&dyn QuoteProvider) -> Result<f64>) -> Result<f64> {
        match &self.provider {
            Some(provider) => lookup(provider.as_ref()),
            None => Err(Error::quote_unavailable("*", "no quote API key configured")),
        }
    }

    fn settle(&self, event: &str, fetched: Result<f64>) -> QuoteValue {
        match fetched {
            Ok(value) => QuoteValue::Value(value),
            Err(e) => {
                emit(
                    self.logger.as_deref(),
                    LogEvent::new(event)
                        .with_component("quotes")
                        .with_error(e.kind())
                        .with_error_details(e.to_string())
                        .with_level(LogLevel::Warning),
                );
                QuoteValue::Unavailable
            }
        }
    }
}
