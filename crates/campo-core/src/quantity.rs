//! Numeric coercion for hand-edited spreadsheet cells.
//!
//! Hectare cells show up as plain numbers, as leftover formulas (`=10`,
//! `(3+4.5)`) or as sums typed by hand (`12+8.5`). [`parse_quantity`] tries,
//! in order:
//!
//! 1. a direct parse of the value;
//! 2. stripping `(`, `)` and `=` and surrounding whitespace;
//! 3. if the cleaned text contains `+`, summing every non-empty part;
//! 4. otherwise a direct parse of the cleaned text;
//! 5. `0.0` when all of the above fail.
//!
//! None of these ever fail outward: one malformed cell must not abort the
//! rest of the file. Non-finite results (`inf`, `NaN`) count as failures.

use crate::types::Cell;

/// Parse a trimmed decimal number, rejecting non-finite values.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a hectare-style quantity. Total: always returns a finite number.
pub fn parse_quantity(text: &str) -> f64 {
    if let Some(n) = parse_number(text) {
        return n;
    }

    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '='))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.contains('+') {
        return sum_parts(cleaned).unwrap_or(0.0);
    }

    parse_number(cleaned).unwrap_or(0.0)
}

/// Sum `+`-separated parts, skipping empty ones. Any unparseable part fails
/// the whole sum.
fn sum_parts(text: &str) -> Option<f64> {
    let mut total = 0.0;
    for part in text.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        total += parse_number(part)?;
    }
    Some(total).filter(|n: &f64| n.is_finite())
}

/// [`parse_quantity`] over a typed cell. Numeric cells pass straight through.
pub fn cell_quantity(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Text(s) => parse_quantity(s),
        _ => 0.0,
    }
}

/// Strict numeric coercion with a zero fallback: no formula stripping and no
/// sums. Used for the frequency column.
pub fn cell_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) if n.is_finite() => *n,
        Cell::Text(s) => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Strict integer coercion for the application-number column. Fractions are
/// truncated; negative or unreadable values become 0.
pub fn cell_count(cell: &Cell) -> u32 {
    let n = cell_number(cell);
    if n <= 0.0 {
        0
    } else {
        n.trunc().min(u32::MAX as f64) as u32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
