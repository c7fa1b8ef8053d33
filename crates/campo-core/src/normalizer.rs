//! Normalizer: folds arbitrary text into an accent-free, upper-case, trimmed
//! token so labels like `"Fecha Aplicación "` and `"FECHA APLICACION"` compare
//! equal.
//!
//! Folding is NFKD decomposition followed by dropping every non-ASCII code
//! point, so `Á` becomes `A` and `ñ` becomes `n` before upper-casing.

use unicode_normalization::UnicodeNormalization;

use crate::types::Cell;

/// Canonicalise a piece of text. Total and idempotent.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.nfkd().filter(char::is_ascii).collect();
    folded.trim().to_ascii_uppercase()
}

/// Canonicalise a cell. Text cells are folded with [`normalize_text`];
/// any other cell returns its plain string representation without case or
/// accent folding.
pub fn normalize(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => normalize_text(s),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
