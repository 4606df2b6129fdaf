//! Result and error types for the core library

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Day-first date literal expected from users
pub const DATE_HINT: &str = "DD.MM.YYYY";

/// Core library error type
///
/// Every condition an analysis engine can hit is a value here; none of them
/// terminate the process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid date '{input}': use the {expected} format")]
    InvalidDate { input: String, expected: &'static str },

    #[error("Transaction data unavailable: {0}")]
    RecordSourceUnavailable(String),

    #[error("Quote unavailable for {symbol}: {reason}")]
    QuoteUnavailable { symbol: String, reason: String },

    #[error("Failed to save report: {0}")]
    Persistence(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid date error for a day-first literal
    pub fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            expected: DATE_HINT,
        }
    }

    /// Create a record source error
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::RecordSourceUnavailable(msg.into())
    }

    /// Create a quote error for a symbol
    pub fn quote_unavailable(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::QuoteUnavailable {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short machine-readable name of the condition
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidDate { .. } => "invalid_date",
            Error::RecordSourceUnavailable(_) => "record_source_unavailable",
            Error::QuoteUnavailable { .. } => "quote_unavailable",
            Error::Persistence(_) => "persistence_failure",
            Error::Config(_) => "config",
            Error::Validation(_) => "validation",
            Error::Io(_) => "io",
            Error::Json(_) => "json",
        }
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for `--json` output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Create a failed result with context
    pub fn fail_with_context(
        error: impl Into<String>,
        context: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: Some(context),
        }
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(Error::InvalidDate { input, expected }) => {
                let mut context = HashMap::new();
                context.insert("input".to_string(), serde_json::Value::from(input.clone()));
                context.insert("expected_format".to_string(), serde_json::Value::from(expected));
                let message = Error::InvalidDate { input, expected }.to_string();
                Self::fail_with_context(message, context)
            }
            Err(e) => Self::fail(e.to_string()),
        }
    }
}
