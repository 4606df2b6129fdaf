//! JSON report file writer

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::ReportSink;

/// Report sink writing a pretty-printed JSON array to one file
///
/// Each write replaces the whole file. Non-ASCII text is written as UTF-8,
/// not escaped.
#[derive(Debug, Clone)]
pub struct JsonFileReport {
    path: PathBuf,
}

impl JsonFileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize with 4-space indentation
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

impl ReportSink for JsonFileReport {
    fn write(&self, records: &[TransactionRecord]) -> Result<PathBuf> {
        let persistence = |e: std::io::Error| {
            Error::Persistence(format!("{}: {}", self.path.display(), e))
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(persistence)?;
            }
        }

        let content = to_pretty_json(records)?;
        std::fs::write(&self.path, content).map_err(persistence)?;
        Ok(self.path.clone())
    }
}
