//! Day-first date parsing.
//!
//! Accepted text shapes, tried in order:
//!
//! - ISO `YYYY-MM-DD`, optionally followed by a time part;
//! - `D/M/Y` with `/`, `-` or `.` separators and 2- or 4-digit years, read
//!   day-first and falling back to month-first when the day-first reading is
//!   not a real date (`12/31/2024`).
//!
//! Numeric cells are Excel serial day numbers. Anything else is `None`.

use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::types::Cell;

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T].*)?$").expect("static regex is valid")
    })
}

fn day_first_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})(?:\s.*)?$")
            .expect("static regex is valid")
    })
}

/// Parse a date typed as text. Returns `None` when no accepted shape matches
/// or the numbers do not form a real calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();

    if let Some(caps) = iso_re().captures(text) {
        let y: i32 = caps[1].parse().ok()?;
        let m: u32 = caps[2].parse().ok()?;
        let d: u32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    let caps = day_first_re().captures(text)?;
    let a: u32 = caps[1].parse().ok()?;
    let b: u32 = caps[2].parse().ok()?;
    let year_txt = &caps[3];
    let mut y: i32 = year_txt.parse().ok()?;
    if year_txt.len() == 2 {
        y += 2000;
    }

    NaiveDate::from_ymd_opt(y, b, a).or_else(|| NaiveDate::from_ymd_opt(y, a, b))
}

/// Convert an Excel serial day number (1900 date system) to a date.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    // Serials below 1 or past year 9999 are not dates.
    if !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Date of a typed cell, or `None` when it cannot be read as one.
pub fn cell_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::Text(s) => parse_date(s),
        Cell::Number(n) => from_excel_serial(*n),
        Cell::Empty | Cell::Bool(_) => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
