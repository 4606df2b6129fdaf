//! Interactive session - dashboard first, then optional searches and a category report

use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Input};
use spendscope_core::{PhoneBoundary, TransactionRecord};

use super::{
    category, dashboard, get_context, get_logger, is_interactive, log_command, reference_date,
    report_date, search,
};
use crate::output;

pub fn run(file: Option<&Path>) -> Result<()> {
    if !is_interactive() {
        anyhow::bail!("The interactive session needs a terminal; use a subcommand instead");
    }

    let logger = get_logger();
    log_command(&logger, "interactive");

    let ctx = get_context(logger)?;
    output::info("Программа анализа банковских операций");

    let date = reference_date(None, "Введите дату для отчёта")?;
    let loaded = ctx.load_records(&ctx.record_source(file));
    let records: Option<Vec<TransactionRecord>> = loaded.as_ref().ok().cloned();

    let summary = dashboard::build(&ctx, loaded, &date, true)?;
    dashboard::print(&summary);

    let Some(records) = records else {
        return Ok(());
    };

    println!();
    if confirm("Хотите воспользоваться поиском по ключевому слову?")? {
        let keyword: String = Input::new()
            .with_prompt("Введите слово для поиска")
            .allow_empty(true)
            .interact_text()?;
        let outcome = ctx.analysis_service.search_by_keyword(&records, &keyword)?;
        search::show(&outcome, false)?;
    }

    println!();
    if confirm("Показать транзакции с номерами телефонов?")? {
        let outcome = ctx
            .analysis_service
            .search_by_phone(&records, PhoneBoundary::default());
        search::show(&outcome, false)?;
    }

    println!();
    if confirm("Сформировать отчёт по категории за три месяца?")? {
        let name: String = Input::new()
            .with_prompt("Введите категорию")
            .interact_text()?;
        let as_of = report_date("Введите дату окончания периода")?;
        let report = category::build(&ctx, &records, name.trim(), Some(&as_of), true)?;
        category::print(&report);
    }

    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
