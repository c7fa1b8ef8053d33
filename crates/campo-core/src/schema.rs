//! Schema mapper: assigns free-form column labels to canonical [`Field`]s.
//!
//! Labels are normalised first, then tested against [`RULES`] in order; the
//! first rule with a matching keyword wins. Order is significant: `HAS` is
//! tested before everything else, so a label such as `FECHAS` maps to
//! hectares.
//!
//! When two columns resolve to the same field, the later column wins.

use std::collections::HashMap;

use crate::normalizer::normalize;
use crate::types::{Cell, Field};

/// A single classification rule: the field is assigned when the normalised
/// label contains any of the keywords.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub field: Field,
}

/// Classification rules, evaluated first-match-wins.
pub const RULES: &[Rule] = &[
    Rule { keywords: &["HAS", "HECT"], field: Field::Hectares },
    Rule { keywords: &["FREC", "DIAS"], field: Field::FrequencyDays },
    Rule { keywords: &["NUM", "APP"], field: Field::ApplicationNumber },
    Rule { keywords: &["FECHA"], field: Field::Date },
    Rule { keywords: &["CATEGORIA"], field: Field::Category },
    Rule { keywords: &["PRODUCTO 1"], field: Field::Product1 },
    Rule { keywords: &["PRODUCTO 2"], field: Field::Product2 },
];

/// Classify one already-normalised label.
pub fn classify(normalized: &str) -> Option<Field> {
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| normalized.contains(k)))
        .map(|rule| rule.field)
}

/// One source column and what it was mapped to.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnAssignment {
    pub index: usize,
    pub label: String,
    pub normalized: String,
    pub field: Option<Field>,
}

/// Result of mapping a header row.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    pub assignments: Vec<ColumnAssignment>,
    resolved: HashMap<Field, usize>,
}

impl ColumnMap {
    /// Map every label in `header`. Unmatched columns are kept in
    /// `assignments` with `field: None` and ignored downstream.
    pub fn from_header(header: &[Cell]) -> Self {
        let mut map = ColumnMap::default();
        for (index, cell) in header.iter().enumerate() {
            let normalized = normalize(cell);
            let field = classify(&normalized);
            if let Some(f) = field {
                if let Some(prev) = map.resolved.insert(f, index) {
                    tracing::debug!(
                        field = %f,
                        previous = prev,
                        current = index,
                        "schema: column collision, later column wins"
                    );
                }
            }
            map.assignments.push(ColumnAssignment {
                index,
                label: cell.to_string(),
                normalized,
                field,
            });
        }
        map
    }

    /// Source column index for `field`, if any column mapped to it.
    pub fn column_for(&self, field: Field) -> Option<usize> {
        self.resolved.get(&field).copied()
    }

    /// Canonical fields present, ordered by the column that supplies them.
    pub fn fields(&self) -> Vec<Field> {
        let mut present: Vec<(usize, Field)> =
            self.resolved.iter().map(|(f, i)| (*i, *f)).collect();
        present.sort();
        present.into_iter().map(|(_, f)| f).collect()
    }

    /// `original label -> canonical field` for every mapped column.
    pub fn label_map(&self) -> HashMap<String, Field> {
        self.assignments
            .iter()
            .filter_map(|a| a.field.map(|f| (a.label.clone(), f)))
            .collect()
    }
}

/// Convenience wrapper over [`ColumnMap::label_map`] for plain string labels.
pub fn map_columns<S: AsRef<str>>(labels: &[S]) -> HashMap<String, Field> {
    let cells: Vec<Cell> = labels.iter().map(|l| Cell::from(l.as_ref())).collect();
    ColumnMap::from_header(&cells).label_map()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
