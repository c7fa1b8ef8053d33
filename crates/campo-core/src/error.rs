use thiserror::Error;

use crate::ingest::IngestStage;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file type: {0:?}")]
    UnsupportedFormat(String),

    #[error("workbook has no sheets")]
    NoSheets,

    #[error("sheet has no rows")]
    EmptySheet,

    #[error("could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("could not read delimited file: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ingestion failed during {stage}: {source}")]
    Stage {
        stage: IngestStage,
        #[source]
        source: Box<IngestError>,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("invalid date {0:?} (use AAAA-MM-DD or DD/MM/AAAA)")]
    Date(String),

    #[error("category must be one of CICLO, FOLIAR, INTERCICLO, CONTROL (got {0:?})")]
    Category(String),

    #[error("application number must be an integer >= 1 (got {0:?})")]
    ApplicationNumber(String),

    #[error("frequency must be an integer >= 0 days (got {0:?})")]
    Frequency(String),

    #[error("hectares must be a number >= 0 (got {0:?})")]
    Hectares(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encode failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
