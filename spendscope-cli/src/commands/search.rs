//! Search command - keyword search over descriptions and categories

use std::path::Path;

use anyhow::Result;
use spendscope_core::domain::NOT_FOUND_TEXT;
use spendscope_core::SearchOutcome;

use super::{get_context, get_logger, load_records, log_command, print_records};
use crate::output;

pub fn run(keyword: &str, file: Option<&Path>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_command(&logger, "search");

    let ctx = get_context(logger)?;
    let records = load_records(&ctx, file)?;
    let outcome = ctx.analysis_service.search_by_keyword(&records, keyword)?;

    show(&outcome, json)
}

/// Print a search outcome as a table or as JSON
pub fn show(outcome: &SearchOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        SearchOutcome::Found(records) => {
            print_records(records);
            output::info(&format!("{} transactions found", records.len()));
        }
        SearchOutcome::NotFound => output::warning(NOT_FOUND_TEXT),
    }

    Ok(())
}
