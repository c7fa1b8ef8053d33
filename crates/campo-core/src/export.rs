//! Export: writes the store out as CSV or JSON Lines.
//!
//! CSV is the round-trip format: the header row is the store's column labels
//! in column order, dates are ISO, numbers use the shortest representation
//! that parses back to the same value, and absent values are blank. Feeding
//! the output back through [`ingest_csv`](crate::ingest::ingest_csv)
//! reproduces the same records.

use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::store::Store;

/// Output format for an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("jsonl") => ExportFormat::Jsonl,
            _ => ExportFormat::Csv,
        }
    }
}

/// Write every record as CSV (UTF-8, comma separated, with header).
pub fn write_csv<W: Write>(store: &Store, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(store.columns().iter().map(|f| f.label()))?;
    for record in store.all() {
        wtr.write_record(store.columns().iter().map(|f| record.field_text(*f)))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one JSON object per record.
pub fn write_jsonl<W: Write>(store: &Store, mut writer: W) -> Result<(), ExportError> {
    for record in store.all() {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write in `format` to `writer`.
pub fn write<W: Write>(store: &Store, format: ExportFormat, writer: W) -> Result<(), ExportError> {
    match format {
        ExportFormat::Csv => write_csv(store, writer),
        ExportFormat::Jsonl => write_jsonl(store, writer),
    }
}

/// Export to a file, creating or truncating it.
pub fn export_to_path(store: &Store, format: ExportFormat, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path)?;
    write(store, format, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), records = store.len(), ?format, "export: written");
    Ok(())
}

/// CSV export as an in-memory byte buffer.
pub fn to_csv_bytes(store: &Store) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(store, &mut buf)?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
