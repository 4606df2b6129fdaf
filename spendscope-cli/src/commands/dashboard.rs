//! Dashboard command - month summary, card totals, top transactions and quotes

use std::path::Path;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use spendscope_core::domain::result::Result as CoreResult;
use spendscope_core::{Dashboard, SpendscopeContext, TransactionRecord};

use super::{get_context, get_logger, log_command, reference_date};
use crate::output;

pub fn run(date: Option<String>, file: Option<&Path>, json: bool) -> Result<()> {
    let logger = get_logger();
    log_command(&logger, "dashboard");

    let ctx = get_context(logger)?;
    let date = reference_date(date, "Дата для отчёта")?;
    let records = ctx.load_records(&ctx.record_source(file));
    let dashboard = build(&ctx, records, &date, !json)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print(&dashboard);
    }

    Ok(())
}

/// Assemble the dashboard for `date` from a load outcome
pub fn build(
    ctx: &SpendscopeContext,
    records: CoreResult<Vec<TransactionRecord>>,
    date: &str,
    show_progress: bool,
) -> Result<Dashboard> {
    let spinner = show_progress.then(|| output::spinner("Fetching quotes..."));
    let dashboard = ctx.dashboard().assemble(
        records,
        date,
        Local::now().naive_local(),
        &ctx.config.settings,
    );
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    Ok(dashboard?)
}

pub fn print(dashboard: &Dashboard) {
    println!("{}", dashboard.greeting.bold());
    println!();

    if let Some(error) = &dashboard.transactions_error {
        output::error(error);
    }
    if let Some(notice) = &dashboard.transactions_notice {
        output::warning(notice);
    }

    if !dashboard.cards.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Card", "Spent", "Cashback"]);
        for card in &dashboard.cards {
            table.add_row(vec![
                card.last_digits.clone(),
                output::format_amount(card.total_spent),
                output::format_amount(card.cashback),
            ]);
        }
        output::align_right(&mut table, 1);
        output::align_right(&mut table, 2);
        println!("{}", table);
    }

    if !dashboard.top_transactions.is_empty() {
        println!("{}", "Top transactions".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Date", "Amount", "Category", "Description"]);
        for tx in &dashboard.top_transactions {
            table.add_row(vec![
                tx.date.clone(),
                output::format_amount(tx.amount),
                tx.category.clone(),
                tx.description.clone(),
            ]);
        }
        output::align_right(&mut table, 1);
        println!("{}", table);
    }

    if !dashboard.currency_rates.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Currency", "Rate"]);
        for rate in &dashboard.currency_rates {
            table.add_row(vec![rate.currency.clone(), rate.rate.to_string()]);
        }
        output::align_right(&mut table, 1);
        println!("{}", table);
    }

    if !dashboard.stock_prices.is_empty() {
        let mut table = output::create_table();
        table.set_header(vec!["Stock", "Price"]);
        for stock in &dashboard.stock_prices {
            table.add_row(vec![stock.stock.clone(), stock.price.to_string()]);
        }
        output::align_right(&mut table, 1);
        println!("{}", table);
    }
}
