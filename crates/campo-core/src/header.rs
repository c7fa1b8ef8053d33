//! Header locator: finds the label row in a loosely structured sheet.
//!
//! Hand-edited workbooks often carry title banners, blank rows or merged
//! cells above the real header. The locator joins each of the first rows
//! into one upper-cased string and picks the first that mentions `FECHA` or
//! `CATEGORIA`.

use crate::types::Cell;

/// Number of leading rows scanned when no config overrides it.
pub const DEFAULT_SCAN_ROWS: usize = 10;

const HEADER_TOKENS: [&str; 2] = ["FECHA", "CATEGORIA"];

/// Index of the header row among the first `scan_rows` rows, or 0 when none
/// of them looks like a header.
pub fn locate_header(rows: &[Vec<Cell>], scan_rows: usize) -> usize {
    rows.iter()
        .take(scan_rows)
        .position(|row| {
            let text = row
                .iter()
                .map(|c| c.to_string().to_uppercase())
                .collect::<Vec<_>>()
                .join(" ");
            HEADER_TOKENS.iter().any(|t| text.contains(t))
        })
        .unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::from(*s)).collect()
    }

    #[test]
    fn skips_banner_and_blank_rows() {
        let rows = vec![row(&["TITLE BANNER"]), row(&[""]), row(&["FECHA CATEGORIA HAS"])];
        assert_eq!(locate_header(&rows, DEFAULT_SCAN_ROWS), 2);
    }

    #[test]
    fn matches_across_cells_and_case() {
        let rows = vec![
            row(&["Reporte", "2024"]),
            row(&["Fecha", "Has", "Producto 1"]),
        ];
        assert_eq!(locate_header(&rows, DEFAULT_SCAN_ROWS), 1);
    }

    #[test]
    fn defaults_to_first_row() {
        let rows = vec![row(&["a", "b"]), row(&["1", "2"])];
        assert_eq!(locate_header(&rows, DEFAULT_SCAN_ROWS), 0);
    }

    #[test]
    fn does_not_look_past_scan_window() {
        let mut rows: Vec<Vec<Cell>> = (0..12).map(|_| row(&["x"])).collect();
        rows.push(row(&["FECHA"]));
        assert_eq!(locate_header(&rows, DEFAULT_SCAN_ROWS), 0);
        assert_eq!(locate_header(&rows, 20), 12);
    }

    #[test]
    fn empty_sheet() {
        assert_eq!(locate_header(&[], DEFAULT_SCAN_ROWS), 0);
    }
}
