//! CLI command implementations

pub mod category;
pub mod dashboard;
pub mod interactive;
pub mod logs;
pub mod phones;
pub mod search;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::Input;
use spendscope_core::config::Config;
use spendscope_core::domain::dates::{parse_day_first, parse_reference_date};
use spendscope_core::domain::result::DATE_HINT;
use spendscope_core::{EntryPoint, LoggingService, SpendscopeContext, TransactionRecord};

use crate::output;

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<Arc<LoggingService>> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .ok()
        .map(Arc::new)
}

/// Log a command execution, ignoring any errors (logging should never break the app)
pub fn log_command(logger: &Option<Arc<LoggingService>>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_command(command);
    }
}

/// Log a failed command with its full error chain
pub fn log_failure(error: &anyhow::Error) {
    if let Some(l) = get_logger() {
        let _ = l.log_error("command_failed", &error.to_string(), Some(&format!("{:#}", error)));
    }
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> PathBuf {
    Config::default_data_dir()
}

/// Build the context, creating the data directory on first use
pub fn get_context(logger: Option<Arc<LoggingService>>) -> Result<SpendscopeContext> {
    let data_dir = get_data_dir();

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    SpendscopeContext::new(&data_dir, logger).context("Failed to initialize spendscope context")
}

/// Load the export, failing the command when it is unavailable
pub fn load_records(ctx: &SpendscopeContext, file: Option<&Path>) -> Result<Vec<TransactionRecord>> {
    let source = ctx.record_source(file);
    ctx.load_records(&source)
        .with_context(|| format!("Could not read transactions from {}", source.path().display()))
}

/// Whether prompts can be shown
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// A strict `DD.MM.YYYY` reference date, prompting until one parses
///
/// Without a terminal a missing date is an error.
pub fn reference_date(provided: Option<String>, prompt: &str) -> Result<String> {
    if let Some(date) = provided {
        parse_reference_date(&date)?;
        return Ok(date);
    }

    if !is_interactive() {
        anyhow::bail!("A date is required: pass --date {}", DATE_HINT);
    }

    let date: String = Input::new()
        .with_prompt(format!("{prompt} ({DATE_HINT})"))
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_reference_date(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(date)
}

/// A day-first date for the category report, prompting until one parses
pub fn report_date(prompt: &str) -> Result<String> {
    let date: String = Input::new()
        .with_prompt(format!("{prompt} ({DATE_HINT})"))
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            parse_day_first(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(date)
}

/// Print records as a table
pub fn print_records(records: &[TransactionRecord]) {
    let mut table = output::create_table();
    table.set_header(vec!["Date", "Card", "Category", "Description", "Amount"]);

    for record in records {
        table.add_row(vec![
            record.operation_date.clone().unwrap_or_default(),
            record.card_key().to_string(),
            record.category_text().to_string(),
            record.description_text().to_string(),
            output::format_amount(record.amount_or_zero()),
        ]);
    }

    println!("{}", table);
}
