//! Core types for campo-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! canonical [`Record`], its [`Category`], the closed set of canonical
//! [`Field`]s, and the typed raw [`Cell`] read from a spreadsheet before any
//! mapping happens.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// One application event after normalisation.
///
/// `hectares` and `frequency_days` are always finite numbers: the ingestion
/// pipeline coerces them before a record is built, and the store never sees
/// raw strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Application date, parsed day-first. `None` when the source cell could
    /// not be read as a date.
    pub date: Option<NaiveDate>,
    /// Application category, classified from the normalised label.
    pub category: Category,
    /// The normalised label the category was classified from. Several labels
    /// share one class (`CONTROL MALEZA`, `CONTROL HONGOS`); this keeps them
    /// apart for the distribution chart and the export.
    pub category_label: String,
    /// Sequence index of the application. 0 means the source had none.
    pub application_number: u32,
    /// Days since the prior application. 0 means "not applicable".
    pub frequency_days: f64,
    /// Hectares treated.
    pub hectares: f64,
    pub product_1: Option<String>,
    pub product_2: Option<String>,
}

impl Record {
    /// Source label of the category, or the class name when none was kept.
    pub fn category_text(&self) -> String {
        if self.category_label.is_empty() {
            self.category.to_string()
        } else {
            self.category_label.clone()
        }
    }

    /// Value of `field` rendered the way the CSV export writes it.
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Date => self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Field::Category => self.category_text(),
            Field::ApplicationNumber => self.application_number.to_string(),
            Field::FrequencyDays => self.frequency_days.to_string(),
            Field::Hectares => self.hectares.to_string(),
            Field::Product1 => self.product_1.clone().unwrap_or_default(),
            Field::Product2 => self.product_2.clone().unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Application category. The four named variants are the ones the manual
/// entry form offers; anything else is kept verbatim (normalised) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Ciclo,
    Foliar,
    Interciclo,
    Control,
    Other(String),
}

impl Category {
    /// The four enumerated categories, in display order.
    pub const NAMED: [Category; 4] = [
        Category::Ciclo,
        Category::Foliar,
        Category::Interciclo,
        Category::Control,
    ];

    /// Classify an already-normalised token.
    ///
    /// `INTER` is tested before `CICLO` because every interciclo label also
    /// contains `CICLO`. Plurals and suffixes ("CICLOS", "FOLIARES") classify
    /// to their base category.
    pub fn classify(token: &str) -> Self {
        if token.contains("INTER") {
            Category::Interciclo
        } else if token.contains("CICLO") {
            Category::Ciclo
        } else if token.contains("FOLIAR") {
            Category::Foliar
        } else if token.contains("CONTROL") {
            Category::Control
        } else {
            Category::Other(token.to_string())
        }
    }

    /// Parse one of the four enumerated labels exactly (case-insensitive).
    /// Used by manual entry, which does not accept free text.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CICLO" => Some(Category::Ciclo),
            "FOLIAR" => Some(Category::Foliar),
            "INTERCICLO" => Some(Category::Interciclo),
            "CONTROL" => Some(Category::Control),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Ciclo => write!(f, "CICLO"),
            Category::Foliar => write!(f, "FOLIAR"),
            Category::Interciclo => write!(f, "INTERCICLO"),
            Category::Control => write!(f, "CONTROL"),
            Category::Other(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The seven canonical fields, in canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Date,
    Category,
    ApplicationNumber,
    FrequencyDays,
    Hectares,
    Product1,
    Product2,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 7] = [
        Field::Date,
        Field::Category,
        Field::ApplicationNumber,
        Field::FrequencyDays,
        Field::Hectares,
        Field::Product1,
        Field::Product2,
    ];

    /// Fields that must be present for the dashboard to have anything to show.
    pub const REQUIRED: [Field; 3] = [Field::Date, Field::Category, Field::Hectares];

    /// Column label written in exports. Re-ingesting an export maps every
    /// label back to the same field.
    pub fn label(self) -> &'static str {
        match self {
            Field::Date => "FECHA",
            Field::Category => "CATEGORIA",
            Field::ApplicationNumber => "NUM. APLICACION",
            Field::FrequencyDays => "FRECUENCIA (DIAS)",
            Field::Hectares => "HAS",
            Field::Product1 => "PRODUCTO 1",
            Field::Product2 => "PRODUCTO 2",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Raw cells
// ---------------------------------------------------------------------------

/// A typed spreadsheet cell as read from the source, before any mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// String representation of a cell. Integral numbers print without a
/// fractional part; booleans print the way spreadsheets show them.
impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::Bool(true) => f.write_str("TRUE"),
            Cell::Bool(false) => f.write_str("FALSE"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// A sheet as a list of rows. No header is assumed; rows may differ in width.
pub type RawSheet = Vec<Vec<Cell>>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
