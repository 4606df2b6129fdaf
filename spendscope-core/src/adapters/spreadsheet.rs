//! Spreadsheet record source
//!
//! Reads a bank export (`.xlsx`, `.xls`, `.ods` or `.csv`) whose first row is
//! the column header. Every data row becomes one `TransactionRecord`.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::{Map, Number, Value as JsonValue};

use crate::domain::dates::TIMESTAMP_FORMAT;
use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::RecordSource;

/// One header-keyed row, empty cells left out
type Row = Map<String, JsonValue>;

/// Record source backed by a spreadsheet file
#[derive(Debug, Clone)]
pub struct SpreadsheetSource {
    path: PathBuf,
}

impl SpreadsheetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<Row>> {
        if !self.path.exists() {
            return Err(Error::source_unavailable(format!(
                "file not found: {}",
                self.path.display()
            )));
        }

        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => read_csv(&self.path),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => read_workbook(&self.path),
            other => Err(Error::source_unavailable(format!(
                "unsupported file type '{}': {}",
                other,
                self.path.display()
            ))),
        }
    }
}

impl RecordSource for SpreadsheetSource {
    fn load(&self) -> Result<Vec<TransactionRecord>> {
        let rows = self.read_rows()?;
        if rows.is_empty() {
            return Err(Error::source_unavailable(format!(
                "no transactions in {}",
                self.path.display()
            )));
        }

        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                serde_json::from_value(JsonValue::Object(row)).map_err(|e| {
                    Error::source_unavailable(format!("row {}: unexpected shape: {}", i + 2, e))
                })
            })
            .collect()
    }
}

// =============================================================================
// Workbook (calamine)
// =============================================================================

fn read_workbook(path: &Path) -> Result<Vec<Row>> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| Error::source_unavailable(format!("Failed to open spreadsheet: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::source_unavailable("spreadsheet has no worksheets"))?
        .map_err(|e| Error::source_unavailable(format!("Failed to read worksheet: {e}")))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();

    let mut out = Vec::new();
    for row in rows {
        let mut record = Row::new();
        for (header, cell) in headers.iter().zip(row) {
            if header.is_empty() {
                continue;
            }
            if let Some(value) = cell_to_json(cell) {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            out.push(record);
        }
    }
    Ok(out)
}

fn cell_to_json(cell: &Data) -> Option<JsonValue> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DurationIso(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| JsonValue::String(s.to_string()))
        }
        Data::DateTimeIso(s) => {
            let s = s.trim();
            let text = iso_to_timestamp(s).unwrap_or_else(|| s.to_string());
            (!text.is_empty()).then_some(JsonValue::String(text))
        }
        Data::Int(i) => Some(JsonValue::from(*i)),
        Data::Float(f) => float_to_json(*f),
        Data::Bool(b) => Some(JsonValue::Bool(*b)),
        Data::DateTime(dt) => excel_serial_to_timestamp(dt.as_f64()).map(JsonValue::String),
    }
}

/// Whole floats become integers so a category cell of `101.0` reads as `101`
fn float_to_json(f: f64) -> Option<JsonValue> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        return Some(JsonValue::from(f as i64));
    }
    Number::from_f64(f).map(JsonValue::Number)
}

/// Render an Excel date serial as `DD.MM.YYYY HH:MM:SS`
pub fn excel_serial_to_timestamp(serial: f64) -> Option<String> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    let ts = base.checked_add_signed(Duration::milliseconds(millis))?;
    Some(ts.format(TIMESTAMP_FORMAT).to_string())
}

/// Render an ISO 8601 date or date-time cell as `DD.MM.YYYY HH:MM:SS`
pub fn iso_to_timestamp(iso: &str) -> Option<String> {
    let ts = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(iso, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(iso, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })?;
    Some(ts.format(TIMESTAMP_FORMAT).to_string())
}

// =============================================================================
// CSV
// =============================================================================

fn read_csv(path: &Path) -> Result<Vec<Row>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::source_unavailable(format!("Failed to read {}: {e}", path.display()))
    })?;
    let content = content.trim_start_matches('\u{feff}');

    let delimiter = detect_delimiter(content.lines().next().unwrap_or(""));
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::source_unavailable(format!("Failed to read CSV header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut out = Vec::new();
    for result in rdr.records() {
        let row = result.map_err(|e| Error::source_unavailable(format!("Failed to read CSV: {e}")))?;
        let mut record = Row::new();
        for (header, field) in headers.iter().zip(row.iter()) {
            let field = field.trim();
            if header.is_empty() || field.is_empty() {
                continue;
            }
            record.insert(header.clone(), JsonValue::String(field.to_string()));
        }
        if !record.is_empty() {
            out.push(record);
        }
    }
    Ok(out)
}

/// Bank exports use `;` when the decimal separator is a comma
fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardKey;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    const EXPORT: &str = "\
Дата операции;Номер карты;Статус;Сумма платежа;Кэшбэк;Категория;Описание
10.01.2018 12:41:24;*5441;OK;-567,53;5;Супермаркеты;Колхоз
12.01.2018 11:10:05;;OK;-87068;;Переводы;+7 921 111-22-33
";

    #[test]
    fn test_load_semicolon_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operations.csv");
        std::fs::write(&path, EXPORT).unwrap();

        let records = SpreadsheetSource::new(&path).load().unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].amount, Some(Decimal::new(-56753, 2)));
        assert_eq!(records[0].cashback, Some(Decimal::from(5)));
        assert_eq!(records[0].card_key(), CardKey::Known("*5441".to_string()));
        assert_eq!(records[0].extra.get("Статус"), Some(&JsonValue::from("OK")));

        assert_eq!(records[1].card_key(), CardKey::Unknown);
        assert_eq!(records[1].cashback, None);
        assert_eq!(records[1].description_text(), "+7 921 111-22-33");
    }

    #[test]
    fn test_load_comma_csv_with_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operations.csv");
        std::fs::write(
            &path,
            "\u{feff}Дата операции,Сумма платежа,Категория\n01.03.2023 12:00:00,-1000,Еда\n",
        )
        .unwrap();

        let records = SpreadsheetSource::new(&path).load().unwrap();
        assert_eq!(records[0].operation_date.as_deref(), Some("01.03.2023 12:00:00"));
        assert_eq!(records[0].amount, Some(Decimal::from(-1000)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = SpreadsheetSource::new(dir.path().join("absent.xlsx"))
            .load()
            .unwrap_err();
        assert!(matches!(err, Error::RecordSourceUnavailable(_)));
    }

    #[test]
    fn test_header_only_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "Дата операции;Сумма платежа\n").unwrap();

        let err = SpreadsheetSource::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::RecordSourceUnavailable(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operations.txt");
        std::fs::write(&path, "whatever").unwrap();

        let err = SpreadsheetSource::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::RecordSourceUnavailable(_)));
    }

    #[test]
    fn test_corrupt_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("operations.xlsx");
        std::fs::write(&path, "not a zip archive").unwrap();

        let err = SpreadsheetSource::new(&path).load().unwrap_err();
        assert!(matches!(err, Error::RecordSourceUnavailable(_)));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_to_json(&Data::Empty), None);
        assert_eq!(cell_to_json(&Data::String("  ".to_string())), None);
        assert_eq!(cell_to_json(&Data::Float(101.0)), Some(JsonValue::from(101)));
        assert_eq!(cell_to_json(&Data::Float(-567.53)), Some(JsonValue::from(-567.53)));
        assert_eq!(cell_to_json(&Data::Float(f64::NAN)), None);
    }

    #[test]
    fn test_excel_serial_to_timestamp() {
        // 43110.5 is 10 Jan 2018 at noon
        assert_eq!(
            excel_serial_to_timestamp(43110.5).as_deref(),
            Some("10.01.2018 12:00:00")
        );
        assert_eq!(
            excel_serial_to_timestamp(43110.0).as_deref(),
            Some("10.01.2018 00:00:00")
        );
    }

    #[test]
    fn test_iso_date_cells_use_export_format() {
        assert_eq!(
            iso_to_timestamp("2018-01-10T12:41:24").as_deref(),
            Some("10.01.2018 12:41:24")
        );
        assert_eq!(
            iso_to_timestamp("2018-01-10T12:41:24.500").as_deref(),
            Some("10.01.2018 12:41:24")
        );
        assert_eq!(
            iso_to_timestamp("2018-01-10").as_deref(),
            Some("10.01.2018 00:00:00")
        );
        assert_eq!(iso_to_timestamp("10.01.2018"), None);

        assert_eq!(
            cell_to_json(&Data::DateTimeIso("2017-12-31T16:44:00".to_string())),
            Some(JsonValue::from("31.12.2017 16:44:00"))
        );
        assert_eq!(
            cell_to_json(&Data::DateTimeIso("not a date".to_string())),
            Some(JsonValue::from("not a date"))
        );
        assert_eq!(cell_to_json(&Data::DateTimeIso(" ".to_string())), None);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c"), b';');
        assert_eq!(detect_delimiter("a,b,c"), b',');
        assert_eq!(detect_delimiter("single"), b',');
    }
}
