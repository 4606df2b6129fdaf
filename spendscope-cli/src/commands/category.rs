//! Category command - three-month spending report for one category

use std::path::Path;

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use spendscope_core::services::category_total;
use spendscope_core::{OperationResult, SaveOutcome, SpendscopeContext, TransactionRecord};

use super::{get_context, get_logger, load_records, log_command, print_records};
use crate::output;

/// Category report as printed with `--json`
#[derive(Debug, Serialize)]
pub struct CategoryReport {
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub transactions: Vec<TransactionRecord>,
    pub saved: SaveOutcome,
}

pub fn run(
    name: &str,
    date: Option<String>,
    file: Option<&Path>,
    no_save: bool,
    json: bool,
) -> Result<()> {
    let logger = get_logger();
    log_command(&logger, "category");

    let ctx = get_context(logger)?;
    let records = load_records(&ctx, file)?;
    let report = build(&ctx, &records, name, date.as_deref(), !no_save);

    if json {
        let result: OperationResult<CategoryReport> = report.into();
        println!("{}", serde_json::to_string_pretty(&result)?);
        if let Some(error) = result.error {
            anyhow::bail!(error);
        }
        return Ok(());
    }

    print(&report?);
    Ok(())
}

/// Build the report and hand it to the report sink when `save` is set
pub fn build(
    ctx: &SpendscopeContext,
    records: &[TransactionRecord],
    name: &str,
    as_of: Option<&str>,
    save: bool,
) -> spendscope_core::domain::result::Result<CategoryReport> {
    let transactions = ctx
        .analysis_service
        .spending_by_category(records, name, as_of)?;

    let saved = if save {
        ctx.report_service.save(&transactions)
    } else {
        SaveOutcome::Skipped
    };

    Ok(CategoryReport {
        category: name.to_string(),
        total: category_total(&transactions),
        transactions,
        saved,
    })
}

pub fn print(report: &CategoryReport) {
    if report.transactions.is_empty() {
        output::warning(&format!(
            "Нет трат в категории '{}' за последние три месяца",
            report.category
        ));
        return;
    }

    print_records(&report.transactions);
    println!(
        "Общая сумма расходов по категории '{}' - {}",
        report.category,
        output::format_amount(report.total)
    );

    match &report.saved {
        SaveOutcome::Saved(path) => output::success(&format!("Report saved to {}", path.display())),
        SaveOutcome::Failed(reason) => output::error(&format!("Report was not saved: {}", reason)),
        SaveOutcome::Skipped => {}
    }
}
