//! Sheet readers: turn a workbook or delimited file into a [`RawSheet`].
//!
//! Workbook containers (`xlsx`, `xls`, `xlsm`, `ods`) go through calamine and
//! only the first worksheet is read. Delimited text goes through the `csv`
//! crate with flexible row widths and no header assumed: header detection
//! happens later, on the raw rows.

use std::io::{Cursor, Read};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};

use crate::error::IngestError;
use crate::types::{Cell, RawSheet};

/// Container format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Workbook,
    Csv,
}

impl SheetFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, IngestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Ok(SheetFormat::Workbook),
            "csv" | "txt" => Ok(SheetFormat::Csv),
            _ => Err(IngestError::UnsupportedFormat(ext)),
        }
    }
}

/// Read the first sheet of the file at `path`. Workbook containers are
/// sniffed from their bytes, so the extension only picks workbook vs csv.
pub fn read_path(path: &Path) -> Result<RawSheet, IngestError> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook_bytes(std::fs::read(path)?),
        SheetFormat::Csv => read_csv(std::fs::File::open(path)?),
    }
}

/// Read the first sheet of an in-memory workbook. The container type is
/// sniffed from the bytes.
pub fn read_workbook_bytes(bytes: Vec<u8>) -> Result<RawSheet, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    first_sheet(&mut workbook)
}

fn first_sheet<RS>(workbook: &mut calamine::Sheets<RS>) -> Result<RawSheet, IngestError>
where
    RS: std::io::Read + std::io::Seek,
{
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(IngestError::NoSheets)?;
    let range = workbook.worksheet_range(&name)?;
    tracing::debug!(
        sheet = %name,
        height = range.height(),
        width = range.width(),
        "sheet: workbook range read"
    );
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match data.as_date() {
            Some(d) => Cell::Date(d),
            None => Cell::Text(data.to_string()),
        },
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

/// Read delimited text with no header assumed. Rows may differ in width.
pub fn read_csv<R: Read>(reader: R) -> Result<RawSheet, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    tracing::debug!(rows = rows.len(), "sheet: csv rows read");
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SheetFormat::from_path(Path::new("datos.XLSX")).unwrap(),
            SheetFormat::Workbook
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("datos.xls")).unwrap(),
            SheetFormat::Workbook
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("Reporte.csv")).unwrap(),
            SheetFormat::Csv
        );
        assert!(matches!(
            SheetFormat::from_path(Path::new("notes.pdf")),
            Err(IngestError::UnsupportedFormat(ext)) if ext == "pdf"
        ));
    }

    #[test]
    fn csv_rows_keep_ragged_widths() {
        let src = "REPORTE\n\nFECHA,HAS\n05/03/2024,12.5\n";
        let rows = read_csv(src.as_bytes()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![Cell::Text("REPORTE".into())]);
        assert_eq!(rows[1], vec![Cell::Text("FECHA".into()), Cell::Text("HAS".into())]);
        assert_eq!(rows[2][1], Cell::Text("12.5".into()));
    }

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        let err = read_workbook_bytes(b"definitely not a zip".to_vec()).unwrap_err();
        assert!(matches!(err, IngestError::Workbook(_)));
    }
}
