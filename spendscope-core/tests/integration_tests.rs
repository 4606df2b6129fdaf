//! Integration tests for spendscope-core
//!
//! These tests drive a real export file on disk through the record source,
//! the analysis engines, report persistence and the dashboard. Quotes are
//! served by an in-memory provider; the log store is a real logs.duckdb.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use spendscope_core::adapters::json_report::JsonFileReport;
use spendscope_core::adapters::spreadsheet::SpreadsheetSource;
use spendscope_core::domain::result::Result as CoreResult;
use spendscope_core::ports::{QuoteProvider, RecordSource};
use spendscope_core::services::{
    category_total, AnalysisService, DashboardService, QuoteService, ReportService,
};
use spendscope_core::{
    EntryPoint, Error, LoggingService, OperationResult, PhoneBoundary, QuoteValue, SaveOutcome,
    SearchOutcome, SpendscopeContext, TransactionRecord, UserSettings,
};

// ============================================================================
// Test Helpers
// ============================================================================

const EXPORT: &str = "\
Дата операции;Дата платежа;Номер карты;Статус;Сумма операции;Валюта операции;Сумма платежа;Валюта платежа;Кэшбэк;Категория;MCC;Описание
31.12.2017 16:44:00;31.12.2017;*7197;OK;-160,89;RUB;-160,89;RUB;;Супермаркеты;5411;Колхоз
10.01.2018 12:41:24;10.01.2018;*5441;OK;-567,53;RUB;-567,53;RUB;5;Супермаркеты;5411;Колхоз
12.01.2018 11:10:05;12.01.2018;*4556;OK;-87068;RUB;-87068;RUB;870;Переводы;;Перевод 8 (912) 222 11 33
13.01.2018 09:00:00;13.01.2018;*4556;OK;20000;RUB;20000;RUB;;Пополнения;;Зарплата
15.01.2018 08:15:55;15.01.2018;;OK;-1000;RUB;-1000;RUB;10;Связь;4814;Я МТС +7 921 111-22-33
20.01.2018 10:00:00;20.01.2018;*5441;OK;-250;RUB;-250;RUB;;Еда;5814;Кафе
";

/// Write the sample export into a fresh data directory
fn write_export(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("data").join("operations.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, EXPORT).unwrap();
    path
}

fn load(path: &Path) -> Vec<TransactionRecord> {
    SpreadsheetSource::new(path).load().expect("Failed to load export")
}

fn create_logger(temp_dir: &TempDir) -> Arc<LoggingService> {
    Arc::new(
        LoggingService::new(temp_dir.path(), EntryPoint::Library, "test")
            .expect("Failed to open log store"),
    )
}

fn jan_16_2018(hour: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2018, 1, 16)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

/// Fixed-price quote provider
struct FixedQuotes;

impl QuoteProvider for FixedQuotes {
    fn name(&self) -> &str {
        "fixed"
    }

    fn exchange_rate(&self, currency: &str, main_currency: &str) -> CoreResult<f64> {
        match (currency, main_currency) {
            ("USD", "RUB") => Ok(81.7265),
            _ => Err(Error::quote_unavailable(
                format!("{currency}/{main_currency}"),
                "unknown pair",
            )),
        }
    }

    fn stock_price(&self, symbol: &str) -> CoreResult<f64> {
        match symbol {
            "AAPL" => Ok(189.987),
            _ => Err(Error::quote_unavailable(symbol, "timeout")),
        }
    }
}

// ============================================================================
// Record Source
// ============================================================================

#[test]
fn test_export_preserves_unknown_columns() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].extra["MCC"], "5411");
    assert_eq!(records[0].extra["Валюта платежа"], "RUB");

    let json = serde_json::to_value(&records[1]).unwrap();
    assert_eq!(json["Сумма платежа"], -567.53);
    assert_eq!(json["Статус"], "OK");
}

// ============================================================================
// Analysis Engines
// ============================================================================

#[test]
fn test_month_search_and_phones_over_export() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));
    let analysis = AnalysisService::new(Some(create_logger(&temp_dir)));

    let window = analysis.filter_month(&records, "16.01.2018").unwrap();
    assert_eq!(window.len(), 4);

    let found = analysis.search_by_keyword(&records, "колхоз").unwrap();
    assert_eq!(found.records().len(), 2);

    let phones = analysis.search_by_phone(&records, PhoneBoundary::Anchored);
    let descriptions: Vec<&str> = phones.records().iter().map(|r| r.description_text()).collect();
    assert_eq!(
        descriptions,
        vec!["Перевод 8 (912) 222 11 33", "Я МТС +7 921 111-22-33"]
    );

    assert_eq!(
        analysis.search_by_keyword(&records, "Такси").unwrap(),
        SearchOutcome::NotFound
    );
}

#[test]
fn test_cards_and_top_over_month() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));
    let analysis = AnalysisService::unlogged();

    let window = analysis.filter_month(&records, "16.01.2018").unwrap();
    let cards = analysis.card_info(&analysis.group_by_card(&window));

    let by_card: Vec<(&str, Decimal, Decimal)> = cards
        .iter()
        .map(|c| (c.last_digits.as_str(), c.total_spent, c.cashback))
        .collect();
    assert_eq!(
        by_card,
        vec![
            ("5441", Decimal::new(56753, 2), Decimal::from(5)),
            ("4556", Decimal::from(87068), Decimal::from(870)),
            ("---", Decimal::from(1000), Decimal::from(10))
        ]
    );

    let top = analysis.top_transactions(&window, 5);
    assert_eq!(top.len(), 4);
    assert_eq!(top[0].amount, Decimal::from(-87068));
    assert_eq!(top[1].amount, Decimal::from(20000));
    assert_eq!(top[0].date, "12.01.2018");
}

// ============================================================================
// Category Report Persistence
// ============================================================================

#[test]
fn test_category_report_is_saved() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));
    let logger = create_logger(&temp_dir);
    let report_path = temp_dir.path().join("reports_data").join("report.json");

    let analysis = AnalysisService::new(Some(Arc::clone(&logger)));
    let reports = ReportService::new(Box::new(JsonFileReport::new(&report_path)), Some(logger));

    let report = analysis
        .spending_by_category(&records, "Супермаркеты", Some("31.01.2018"))
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(category_total(&report), Decimal::new(-72842, 2));

    assert_eq!(reports.save(&report), SaveOutcome::Saved(report_path.clone()));

    let saved: Vec<serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0]["Дата операции"], "31.12.2017 16:44:00");
    assert_eq!(saved[0]["MCC"], "5411");
}

#[test]
fn test_empty_category_report_is_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));
    let report_path = temp_dir.path().join("reports_data").join("report.json");

    let analysis = AnalysisService::unlogged();
    let reports = ReportService::new(Box::new(JsonFileReport::new(&report_path)), None);

    let report = analysis
        .spending_by_category(&records, "Супермаркеты", Some("31.03.2024"))
        .unwrap();
    assert_eq!(reports.save(&report), SaveOutcome::Skipped);
    assert!(!report_path.exists());
}

#[test]
fn test_invalid_category_date_is_structured() {
    let temp_dir = TempDir::new().unwrap();
    let records = load(&write_export(&temp_dir));
    let analysis = AnalysisService::unlogged();

    let result: OperationResult<Vec<TransactionRecord>> = analysis
        .spending_by_category(&records, "Еда", Some("31.02.2018"))
        .into();
    assert!(!result.success);
    assert_eq!(result.context.unwrap()["expected_format"], "DD.MM.YYYY");
}

// ============================================================================
// Dashboard
// ============================================================================

#[test]
fn test_dashboard_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_export(&temp_dir);
    let logger = create_logger(&temp_dir);

    let analysis = AnalysisService::new(Some(Arc::clone(&logger)));
    let quotes = QuoteService::new(Some(Box::new(FixedQuotes)), Some(Arc::clone(&logger)));
    let dashboard = DashboardService::new(&analysis, &quotes)
        .assemble(
            SpreadsheetSource::new(&path).load(),
            "16.01.2018",
            jan_16_2018(14),
            &UserSettings::default(),
        )
        .unwrap();

    assert_eq!(dashboard.greeting, "Добрый день!");
    assert_eq!(dashboard.cards.len(), 3);
    assert_eq!(dashboard.currency_rates[0].rate, QuoteValue::Value(81.7265));
    assert_eq!(dashboard.currency_rates[1].rate, QuoteValue::Unavailable);
    assert_eq!(dashboard.stock_prices[0].price, QuoteValue::Value(189.99));
    assert_eq!(dashboard.stock_prices.len(), 5);

    let json = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(json["stock_prices"][1]["price"], "Данные отсутствуют");
    assert_eq!(json["cards"][0]["last_digits"], "5441");

    // One warning per unavailable quote: EUR plus four stocks
    assert_eq!(logger.get_warnings(20).unwrap().len(), 5);
}

#[test]
fn test_dashboard_with_missing_export() {
    let temp_dir = TempDir::new().unwrap();
    let analysis = AnalysisService::unlogged();
    let quotes = QuoteService::new(Some(Box::new(FixedQuotes)), None);

    let dashboard = DashboardService::new(&analysis, &quotes)
        .assemble(
            SpreadsheetSource::new(temp_dir.path().join("missing.xlsx")).load(),
            "16.01.2018",
            jan_16_2018(2),
            &UserSettings::default(),
        )
        .unwrap();

    assert_eq!(dashboard.greeting, "Доброй ночи!");
    assert_eq!(
        dashboard.transactions_error.as_deref(),
        Some("Не удалось получить данные о транзакциях")
    );
    assert_eq!(dashboard.currency_rates.len(), 2);
}

// ============================================================================
// Context
// ============================================================================

#[test]
fn test_context_wires_default_paths() {
    let temp_dir = TempDir::new().unwrap();
    let logger = create_logger(&temp_dir);
    let ctx = SpendscopeContext::new(temp_dir.path(), Some(Arc::clone(&logger))).unwrap();

    assert_eq!(
        ctx.record_source(None).path(),
        temp_dir.path().join("data").join("operations.xlsx")
    );

    let err = ctx.load_records(&ctx.record_source(None)).unwrap_err();
    assert!(matches!(err, Error::RecordSourceUnavailable(_)));

    let path = write_export(&temp_dir);
    let records = ctx.load_records(&ctx.record_source(Some(&path))).unwrap();
    assert_eq!(records.len(), 6);

    let events: Vec<String> = logger
        .get_recent(10)
        .unwrap()
        .into_iter()
        .map(|e| e.event)
        .collect();
    assert_eq!(events, vec!["records_loaded", "records_unavailable"]);
}
