//! Store: the in-memory table of canonical [`Record`]s for one session.
//!
//! The store is the single source of truth: the dashboard reads from it,
//! never from an uploaded file directly. It supports exactly two mutations,
//! bulk [`replace`](Store::replace) and single-record
//! [`append`](Store::append); there is no removal or in-place update.
//! Insertion order is display order and duplicates are allowed.
//!
//! Values are stored as given. Coercion belongs to the ingestion pipeline
//! and to manual-entry validation.

use crate::ingest::{IngestStage, Ingested};
use crate::types::{Field, Record};

/// What to do with an ingested batch when the store already holds data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Replace unless the store is already [ready](Store::is_ready): data
    /// still missing a required column is replaced too.
    #[default]
    IfEmpty,
    /// Always replace (forced reload).
    Replace,
    /// Append every ingested record after the existing ones.
    Append,
}

impl std::str::FromStr for LoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "if-empty" | "if_empty" => Ok(LoadPolicy::IfEmpty),
            "replace" => Ok(LoadPolicy::Replace),
            "append" | "merge" => Ok(LoadPolicy::Append),
            other => Err(format!("unknown load policy: {other}")),
        }
    }
}

/// Result of [`Store::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Replaced(usize),
    Appended(usize),
    /// The store was ready and the policy was [`LoadPolicy::IfEmpty`].
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    records: Vec<Record>,
    columns: Vec<Field>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// An empty store. Its column set is the full canonical schema.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            columns: Field::ALL.to_vec(),
        }
    }

    /// Discard current contents and install `records` with the given column
    /// set (the canonical fields the source supplied).
    pub fn replace(&mut self, records: Vec<Record>, columns: Vec<Field>) {
        tracing::info!(
            previous = self.records.len(),
            records = records.len(),
            "store: replace"
        );
        self.records = records;
        self.columns = columns;
    }

    /// Add one record at the end. Any canonical field the store did not yet
    /// carry is added to the column set, in canonical order.
    pub fn append(&mut self, record: Record) {
        for field in Field::ALL {
            if !self.columns.contains(&field) {
                self.columns.push(field);
            }
        }
        self.records.push(record);
        tracing::debug!(len = self.records.len(), "store: append");
    }

    /// All records, in insertion order.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Canonical fields present, in column order.
    pub fn columns(&self) -> &[Field] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when there is data and the date, category and hectare columns
    /// are all present. Otherwise the dashboard shows onboarding instead.
    pub fn is_ready(&self) -> bool {
        !self.records.is_empty() && Field::REQUIRED.iter().all(|f| self.columns.contains(f))
    }

    /// Commit an ingested batch according to `policy`. This is the final
    /// `ValuesCoerced -> Committed` transition of the ingestion pipeline.
    pub fn commit(&mut self, batch: Ingested, policy: LoadPolicy) -> CommitOutcome {
        let outcome = match policy {
            LoadPolicy::IfEmpty if self.is_ready() => CommitOutcome::Skipped,
            LoadPolicy::IfEmpty | LoadPolicy::Replace => {
                let n = batch.records.len();
                self.replace(batch.records, batch.columns);
                CommitOutcome::Replaced(n)
            }
            LoadPolicy::Append => {
                let n = batch.records.len();
                for field in batch.columns {
                    if !self.columns.contains(&field) {
                        self.columns.push(field);
                    }
                }
                self.records.extend(batch.records);
                CommitOutcome::Appended(n)
            }
        };
        tracing::info!(
            ?policy,
            ?outcome,
            stage = %IngestStage::Committed,
            "ingest: stage"
        );
        outcome
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn record(hectares: f64) -> Record {
        Record {
            date: None,
            category: Category::Ciclo,
            category_label: "CICLO".into(),
            application_number: 1,
            frequency_days: 0.0,
            hectares,
            product_1: None,
            product_2: None,
        }
    }

    fn batch(n: usize, columns: Vec<Field>) -> Ingested {
        Ingested {
            records: (0..n).map(|i| record(i as f64)).collect(),
            columns,
            header_row: 0,
        }
    }

    #[test]
    fn fresh_store_is_empty_and_not_ready() {
        let store = Store::new();
        assert!(store.is_empty());
        assert!(!store.is_ready());
        assert_eq!(store.columns(), &Field::ALL);
    }

    #[test]
    fn if_empty_policy_skips_when_loaded() {
        let mut store = Store::new();
        assert_eq!(
            store.commit(batch(2, Field::ALL.to_vec()), LoadPolicy::IfEmpty),
            CommitOutcome::Replaced(2)
        );
        let before = store.clone();
        assert_eq!(
            store.commit(batch(5, Field::ALL.to_vec()), LoadPolicy::IfEmpty),
            CommitOutcome::Skipped
        );
        assert_eq!(store, before);
    }

    #[test]
    fn if_empty_policy_replaces_data_that_is_not_ready() {
        let mut store = Store::new();
        store.commit(batch(2, vec![Field::Date, Field::Category]), LoadPolicy::IfEmpty);
        assert!(!store.is_ready());

        let outcome = store.commit(batch(3, Field::ALL.to_vec()), LoadPolicy::IfEmpty);
        assert_eq!(outcome, CommitOutcome::Replaced(3));
        assert!(store.is_ready());
    }

    #[test]
    fn replace_policy_installs_new_columns() {
        let mut store = Store::new();
        store.commit(batch(3, Field::ALL.to_vec()), LoadPolicy::Replace);
        store.commit(batch(1, vec![Field::Hectares]), LoadPolicy::Replace);
        assert_eq!(store.len(), 1);
        assert_eq!(store.columns(), &[Field::Hectares]);
        assert!(!store.is_ready());
    }

    #[test]
    fn append_policy_keeps_existing_records_first() {
        let mut store = Store::new();
        store.commit(batch(2, vec![Field::Date, Field::Hectares]), LoadPolicy::Replace);
        let outcome = store.commit(batch(3, vec![Field::Category]), LoadPolicy::Append);
        assert_eq!(outcome, CommitOutcome::Appended(3));
        assert_eq!(store.len(), 5);
        assert_eq!(store.columns(), &[Field::Date, Field::Hectares, Field::Category]);
        assert!(store.is_ready());
    }

    #[test]
    fn manual_append_completes_column_set() {
        let mut store = Store::new();
        store.replace(vec![record(1.0)], vec![Field::Hectares, Field::Date]);
        store.append(record(2.0));
        assert_eq!(store.columns()[..2], [Field::Hectares, Field::Date]);
        assert_eq!(store.columns().len(), Field::ALL.len());
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("merge".parse::<LoadPolicy>(), Ok(LoadPolicy::Append));
        assert_eq!("IF-EMPTY".parse::<LoadPolicy>(), Ok(LoadPolicy::IfEmpty));
        assert!("sometimes".parse::<LoadPolicy>().is_err());
    }
}
