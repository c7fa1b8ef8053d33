#![allow(dead_code)]
//! Test builders: ergonomic constructors for `Record`, `Store` and raw
//! sheets.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use campo_core::{Category, Cell, Field, RawSheet, Record, Store};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new()
///     .date(2024, 3, 5)
///     .category(Category::Foliar)
///     .hectares(12.5)
///     .products("Urea", "Zinc")
///     .build();
/// ```
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {
            record: Record {
                date: NaiveDate::from_ymd_opt(2024, 1, 1),
                category: Category::Ciclo,
                category_label: "CICLO".into(),
                application_number: 1,
                frequency_days: 0.0,
                hectares: 1.0,
                product_1: None,
                product_2: None,
            },
        }
    }

    pub fn date(mut self, y: i32, m: u32, d: u32) -> Self {
        self.record.date = Some(NaiveDate::from_ymd_opt(y, m, d).expect("valid test date"));
        self
    }

    pub fn undated(mut self) -> Self {
        self.record.date = None;
        self
    }

    /// Sets the class and a matching label.
    pub fn category(mut self, category: Category) -> Self {
        self.record.category_label = category.to_string();
        self.record.category = category;
        self
    }

    /// Sets the free-text label and the class it folds to.
    pub fn label(mut self, label: &str) -> Self {
        self.record.category = Category::classify(label);
        self.record.category_label = label.to_string();
        self
    }

    pub fn application(mut self, n: u32) -> Self {
        self.record.application_number = n;
        self
    }

    pub fn frequency(mut self, days: f64) -> Self {
        self.record.frequency_days = days;
        self
    }

    pub fn hectares(mut self, hectares: f64) -> Self {
        self.record.hectares = hectares;
        self
    }

    pub fn products(mut self, p1: &str, p2: &str) -> Self {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        self.record.product_1 = opt(p1);
        self.record.product_2 = opt(p2);
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

// ---------------------------------------------------------------------------
// Store / sheet helpers
// ---------------------------------------------------------------------------

/// A store holding `records` with the full canonical column set.
pub fn store_with(records: Vec<Record>) -> Store {
    let mut store = Store::new();
    store.replace(records, Field::ALL.to_vec());
    store
}

/// A raw sheet from string cells; `""` becomes an empty cell.
pub fn sheet(rows: &[&[&str]]) -> RawSheet {
    rows.iter()
        .map(|row| row.iter().map(|s| Cell::from(*s)).collect())
        .collect()
}
