//! campo: terminal dashboard for field application spreadsheets.
//!
//! The pipeline and data model live in `campo-core`; the interactive shell in
//! `campo-tui`. This crate adds the binary and the plain-text report printed
//! by headless mode.
//!
//! # Architecture
//!
//! ```text
//! file ──► sheet ──► header ──► schema ──► coercion ──► Store ──► Summary ──► TUI / report
//!                                                        ▲   └──► Export
//!                                     manual entry ──────┘
//! ```

pub mod report;

pub use campo_core::{
    config, entry, export, ingest, summary, Category, Field, LoadPolicy, Record, Store,
};
