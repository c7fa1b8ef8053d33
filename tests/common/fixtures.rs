#![allow(dead_code)]
//! Spreadsheet fixtures shared across harnesses.
//!
//! The messy sheet mirrors what field staff actually send: a title banner,
//! a blank spacer, accented header labels in mixed case, quantities written
//! as arithmetic, and an unmapped notes column.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// Index of the header row in [`MESSY_ROWS`].
pub const MESSY_HEADER_ROW: usize = 2;

pub const MESSY_ROWS: &[&[&str]] = &[
    &["FINCA LA ESPERANZA - REGISTRO DE APLICACIONES 2024"],
    &["", ""],
    &["Fecha", "Categoría", "Núm. App", "Frecuencia (días)", "Hás.", "Producto 1", "Producto 2", "Observaciones"],
    &["05/03/2024", "Ciclo", "1", "0", "(3+4.5)", "Mancozeb", "", "lluvia"],
    &["19/03/2024", "foliares", "2", "14", "=10", "Urea", "Zinc", ""],
    &["", "", "", "", "", "", "", ""],
    &["2024-04-02", "Interciclo 3", "3", "14", "12,5", "Mancozeb", "Urea", ""],
    &["16/04/2024", "control sigatoka", "", "14", "n/a", "", "", ""],
];

/// [`MESSY_ROWS`] as CSV text. The blank row between data rows becomes an
/// empty line, the way a spreadsheet program saves it.
pub fn messy_csv() -> String {
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(Vec::new());
    for (i, row) in MESSY_ROWS.iter().enumerate() {
        if i > MESSY_HEADER_ROW && row.iter().all(|c| c.is_empty()) {
            wtr.flush().expect("in-memory csv flush");
            let mut buf = wtr.into_inner().expect("flush csv");
            buf.push(b'\n');
            wtr = csv::WriterBuilder::new().flexible(true).from_writer(buf);
            continue;
        }
        wtr.write_record(*row).expect("in-memory csv write");
    }
    String::from_utf8(wtr.into_inner().expect("flush csv")).expect("utf-8 csv")
}

/// Write [`MESSY_ROWS`] to `dir/name` and return the path.
pub fn write_messy_csv(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, messy_csv()).expect("write csv fixture");
    path
}

/// Build an xlsx workbook with a banner row, a header on row 1, and typed
/// cells: real dates (serials with a date format), numbers, and text
/// quantities.
pub fn workbook_bytes() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("dd/mm/yyyy");
    let sheet = workbook.add_worksheet();

    sheet.write_string(0, 0, "Control de aplicaciones")?;

    for (col, label) in ["FECHA", "CATEGORIA", "NUM APP", "FRECUENCIA", "HAS", "PRODUCTO 1", "PRODUCTO 2"]
        .iter()
        .enumerate()
    {
        sheet.write_string(1, col as u16, *label)?;
    }

    // 45356 = 2024-03-05, 45370 = 2024-03-19
    sheet.write_number_with_format(2, 0, 45356.0, &date_format)?;
    sheet.write_string(2, 1, "CICLO")?;
    sheet.write_number(2, 2, 1.0)?;
    sheet.write_number(2, 3, 0.0)?;
    sheet.write_number(2, 4, 12.5)?;
    sheet.write_string(2, 5, "Mancozeb")?;

    sheet.write_number_with_format(3, 0, 45370.0, &date_format)?;
    sheet.write_string(3, 1, "Foliar")?;
    sheet.write_number(3, 2, 2.0)?;
    sheet.write_number(3, 3, 14.0)?;
    sheet.write_string(3, 4, "(2+3)")?;
    sheet.write_string(3, 5, "Urea")?;
    sheet.write_string(3, 6, "Zinc")?;

    workbook.save_to_buffer()
}

/// Write [`workbook_bytes`] to `dir/name` and return the path.
pub fn write_workbook(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, workbook_bytes().expect("build xlsx fixture")).expect("write xlsx fixture");
    path
}
