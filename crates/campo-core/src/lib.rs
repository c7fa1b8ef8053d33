//! campo-core: ingestion and data model for the campo dashboard.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! sheet ──► header ──► schema ──► quantity/dates ──► Store ──► Summary
//!   (ingest: Idle → HeaderDetected → ColumnsMapped → ValuesCoerced)  │
//!                                    entry (manual) ──┘      └──► Export
//! ```
//!
//! Everything runs synchronously on the caller's thread. One interaction
//! (load, add, export) completes before the next one starts.

pub mod config;
pub mod dates;
pub mod entry;
pub mod error;
pub mod export;
pub mod header;
pub mod ingest;
pub mod normalizer;
pub mod quantity;
pub mod schema;
pub mod sheet;
pub mod store;
pub mod summary;
pub mod types;

pub use error::{EntryError, ExportError, IngestError};
pub use store::{CommitOutcome, LoadPolicy, Store};
pub use types::{Category, Cell, Field, RawSheet, Record};
