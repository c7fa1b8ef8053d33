//! Ingestor: turns an uploaded sheet into canonical [`Record`]s.
//!
//! ```text
//! Idle ──► HeaderDetected ──► ColumnsMapped ──► ValuesCoerced ──► Committed
//! ```
//!
//! The pipeline is linear with no retry. Everything up to `ValuesCoerced`
//! happens here and produces an [`Ingested`] batch; `Committed` is reached
//! only when the caller hands that batch to
//! [`Store::commit`](crate::store::Store::commit). Any error before that
//! point leaves the store exactly as it was.

use std::path::Path;

use crate::dates::cell_date;
use crate::error::IngestError;
use crate::header::{locate_header, DEFAULT_SCAN_ROWS};
use crate::normalizer::normalize;
use crate::quantity::{cell_count, cell_number, cell_quantity};
use crate::schema::ColumnMap;
use crate::sheet::{self, SheetFormat};
use crate::types::{Category, Cell, Field, RawSheet, Record};

/// Position in the ingestion state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestStage {
    Idle,
    HeaderDetected,
    ColumnsMapped,
    ValuesCoerced,
    Committed,
}

impl std::fmt::Display for IngestStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestStage::Idle => write!(f, "read"),
            IngestStage::HeaderDetected => write!(f, "header detection"),
            IngestStage::ColumnsMapped => write!(f, "column mapping"),
            IngestStage::ValuesCoerced => write!(f, "value coercion"),
            IngestStage::Committed => write!(f, "commit"),
        }
    }
}

/// Knobs for the pipeline. Built from the `[ingest]` config section.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// How many leading rows the header locator scans.
    pub header_scan_rows: usize,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { header_scan_rows: DEFAULT_SCAN_ROWS }
    }
}

/// A coerced batch, ready to be committed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingested {
    pub records: Vec<Record>,
    /// Canonical fields the source supplied, in source column order.
    pub columns: Vec<Field>,
    /// Index of the detected header row within the raw sheet.
    pub header_row: usize,
}

/// Read and ingest the file at `path`.
pub fn ingest_path(path: &Path, opts: &IngestOptions) -> Result<Ingested, IngestError> {
    tracing::info!(path = %path.display(), "ingest: reading");
    let format = SheetFormat::from_path(path).map_err(|e| at_stage(IngestStage::Idle, e))?;
    let raw = sheet::read_path(path).map_err(|e| at_stage(IngestStage::Idle, e))?;
    ingest_rows(&raw, opts, BlankRows::of(format))
}

/// Ingest an in-memory workbook (xlsx/xls/ods bytes).
pub fn ingest_workbook_bytes(bytes: Vec<u8>, opts: &IngestOptions) -> Result<Ingested, IngestError> {
    let raw = sheet::read_workbook_bytes(bytes).map_err(|e| at_stage(IngestStage::Idle, e))?;
    ingest_rows(&raw, opts, BlankRows::Skip)
}

/// Ingest delimited text. Every record after the header becomes a row, even
/// one whose fields are all blank; empty lines never reach this far.
pub fn ingest_csv<R: std::io::Read>(reader: R, opts: &IngestOptions) -> Result<Ingested, IngestError> {
    let raw = sheet::read_csv(reader).map_err(|e| at_stage(IngestStage::Idle, e))?;
    ingest_rows(&raw, opts, BlankRows::Keep)
}

/// Run header detection, column mapping and value coercion over a worksheet
/// range. Rows whose cells are all empty are range padding and are skipped.
pub fn ingest_sheet(raw: &RawSheet, opts: &IngestOptions) -> Result<Ingested, IngestError> {
    ingest_rows(raw, opts, BlankRows::Skip)
}

/// What to do with data rows whose cells are all empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlankRows {
    Skip,
    Keep,
}

impl BlankRows {
    fn of(format: SheetFormat) -> Self {
        match format {
            SheetFormat::Workbook => BlankRows::Skip,
            SheetFormat::Csv => BlankRows::Keep,
        }
    }
}

fn ingest_rows(raw: &RawSheet, opts: &IngestOptions, blank: BlankRows) -> Result<Ingested, IngestError> {
    if raw.is_empty() {
        return Err(at_stage(IngestStage::Idle, IngestError::EmptySheet));
    }

    // Idle -> HeaderDetected
    let header_row = locate_header(raw, opts.header_scan_rows);
    tracing::debug!(header_row, stage = %IngestStage::HeaderDetected, "ingest: stage");

    // HeaderDetected -> ColumnsMapped
    let map = ColumnMap::from_header(&raw[header_row]);
    let columns = map.fields();
    tracing::debug!(
        columns = ?columns,
        unmapped = map.assignments.iter().filter(|a| a.field.is_none()).count(),
        stage = %IngestStage::ColumnsMapped,
        "ingest: stage"
    );

    // ColumnsMapped -> ValuesCoerced
    let records: Vec<Record> = raw[header_row + 1..]
        .iter()
        .filter(|row| blank == BlankRows::Keep || !row.iter().all(Cell::is_empty))
        .map(|row| coerce_row(row, &map))
        .collect();
    tracing::info!(
        records = records.len(),
        stage = %IngestStage::ValuesCoerced,
        "ingest: stage"
    );

    Ok(Ingested { records, columns, header_row })
}

fn at_stage(stage: IngestStage, source: IngestError) -> IngestError {
    IngestError::Stage { stage, source: Box::new(source) }
}

/// Build one record from a data row. Missing columns and short rows read as
/// empty cells.
fn coerce_row(row: &[Cell], map: &ColumnMap) -> Record {
    let cell = |field: Field| cell_at(row, map, field);

    let category_label = normalize(cell(Field::Category));
    Record {
        date: cell_date(cell(Field::Date)),
        category: Category::classify(&category_label),
        category_label,
        application_number: cell_count(cell(Field::ApplicationNumber)),
        frequency_days: cell_number(cell(Field::FrequencyDays)),
        hectares: cell_quantity(cell(Field::Hectares)),
        product_1: text_value(cell(Field::Product1)),
        product_2: text_value(cell(Field::Product2)),
    }
}

static EMPTY: Cell = Cell::Empty;

fn cell_at<'a>(row: &'a [Cell], map: &ColumnMap, field: Field) -> &'a Cell {
    map.column_for(field)
        .and_then(|i| row.get(i))
        .unwrap_or(&EMPTY)
}

fn text_value(cell: &Cell) -> Option<String> {
    let text = cell.to_string();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
