//! Twelve Data API client
//!
//! Fetches exchange rates and latest stock prices for the dashboard.
//!
//! API Documentation: https://twelvedata.com/docs

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::parse_amount_text;
use crate::domain::result::{Error as DomainError, Result as DomainResult};
use crate::ports::QuoteProvider;

// =============================================================================
// API Response Models
// =============================================================================

/// Fields shared by every Twelve Data response
///
/// Failures arrive as HTTP 200 with `{"code": 401, "message": "...", "status": "error"}`.
#[derive(Debug, Clone, Default, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

/// `GET /exchange_rate?symbol=USD/RUB`
#[derive(Debug, Clone, Deserialize)]
struct ExchangeRateResponse {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    rate: Option<f64>,
    #[serde(flatten)]
    status: ApiStatus,
}

/// `GET /price?symbol=AAPL`
#[derive(Debug, Clone, Deserialize)]
struct PriceResponse {
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    price: Option<f64>,
    #[serde(flatten)]
    status: ApiStatus,
}

/// Deserialize a number that can arrive as JSON number or string
fn deserialize_optional_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<JsonValue> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => parse_amount_text(&s).and_then(|d| d.to_f64()),
        _ => None,
    })
}

// =============================================================================
// Twelve Data HTTP Client
// =============================================================================

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Twelve Data API client
#[derive(Debug)]
pub struct TwelveDataClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl TwelveDataClient {
    /// Create a client for `base_url` (see `Config::quote_base_url`)
    pub fn new_with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        Self::build(api_key, base_url, REQUEST_TIMEOUT)
    }

    /// Replace the request timeout
    pub fn with_timeout(self, timeout: Duration) -> Result<Self> {
        Self::build(&self.api_key, &self.base_url, timeout)
    }

    fn build(api_key: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            anyhow::bail!("Twelve Data API key cannot be empty");
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Rate of one unit of `from` in `to`
    pub fn exchange_rate(&self, from: &str, to: &str) -> Result<f64> {
        let symbol = format!("{from}/{to}");
        let response: ExchangeRateResponse = self.get_json("exchange_rate", &symbol)?;
        check_api_status(&response.status)?;
        response
            .rate
            .ok_or_else(|| anyhow::anyhow!("Response has no usable 'rate' field"))
    }

    /// Latest traded price of `symbol`
    pub fn price(&self, symbol: &str) -> Result<f64> {
        let response: PriceResponse = self.get_json("price", symbol)?;
        check_api_status(&response.status)?;
        response
            .price
            .ok_or_else(|| anyhow::anyhow!("Response has no usable 'price' field"))
    }

    fn endpoint_url(&self, endpoint: &str, symbol: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/{}", self.base_url, endpoint),
            &[("symbol", symbol), ("apikey", self.api_key.as_str())],
        )
        .with_context(|| format!("Invalid Twelve Data URL: {}", self.base_url))
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str, symbol: &str) -> Result<T> {
        let url = self.endpoint_url(endpoint, symbol)?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        response
            .json()
            .with_context(|| format!("Failed to parse Twelve Data {endpoint} response"))
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> anyhow::Error {
        if error.is_timeout() {
            anyhow::anyhow!("Connection timed out after {} seconds", self.timeout.as_secs())
        } else if error.is_connect() {
            anyhow::anyhow!("Unable to connect to Twelve Data servers")
        } else {
            anyhow::anyhow!("Twelve Data request failed: {}", error)
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &reqwest::blocking::Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            401 => anyhow::bail!("Twelve Data authentication failed. Check TWELVEDATA_API_KEY."),
            429 => anyhow::bail!("Twelve Data rate limit exceeded. Please wait a minute and try again."),
            404 => anyhow::bail!("Twelve Data resource not found."),
            status => anyhow::bail!("Twelve Data API error: HTTP {}", status),
        }
    }
}

/// Reject the in-body error shape
fn check_api_status(status: &ApiStatus) -> Result<()> {
    if status.status.as_deref() == Some("error") {
        anyhow::bail!(
            "Twelve Data error {}: {}",
            status.code.unwrap_or_default(),
            status.message.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

// =============================================================================
// TwelveDataProvider - implements QuoteProvider trait
// =============================================================================

/// Quote provider backed by the Twelve Data API
pub struct TwelveDataProvider {
    client: TwelveDataClient,
}

impl TwelveDataProvider {
    pub fn new(client: TwelveDataClient) -> Self {
        Self { client }
    }

    /// Provider for an API key and base URL
    pub fn connect(api_key: &str, base_url: &str) -> DomainResult<Self> {
        TwelveDataClient::new_with_base_url(api_key, base_url)
            .map(Self::new)
            .map_err(|e| DomainError::Config(format!("{e:#}")))
    }
}

impl QuoteProvider for TwelveDataProvider {
    fn name(&self) -> &str {
        "twelvedata"
    }

    fn exchange_rate(&self, currency: &str, main_currency: &str) -> DomainResult<f64> {
        self.client
            .exchange_rate(currency, main_currency)
            .map_err(|e| DomainError::quote_unavailable(format!("{currency}/{main_currency}"), format!("{e:#}")))
    }

    fn stock_price(&self, symbol: &str) -> DomainResult<f64> {
        self.client
            .price(symbol)
            .map_err(|e| DomainError::quote_unavailable(symbol, format!("{e:#}")))
    }
}
