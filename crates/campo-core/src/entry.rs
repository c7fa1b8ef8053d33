//! Manual entry: validates one hand-typed record before it is appended.
//!
//! Form fields arrive as strings. Unlike spreadsheet ingestion, nothing is
//! coerced silently here: a bad value is reported back so the user can fix
//! it, and the store is left alone.

use chrono::NaiveDate;

use crate::dates::parse_date;
use crate::error::EntryError;
use crate::quantity::parse_number;
use crate::types::{Category, Record};

/// Raw form input for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEntry {
    /// Blank means today.
    pub date: String,
    pub category: String,
    pub application_number: String,
    pub frequency_days: String,
    pub hectares: String,
    pub product_1: String,
    pub product_2: String,
}

impl ManualEntry {
    /// Validate against `today` (used when the date is left blank).
    pub fn validate_on(&self, today: NaiveDate) -> Result<Record, EntryError> {
        let date = if self.date.trim().is_empty() {
            today
        } else {
            parse_date(&self.date).ok_or_else(|| EntryError::Date(self.date.clone()))?
        };

        let category = Category::from_label(&self.category)
            .ok_or_else(|| EntryError::Category(self.category.clone()))?;

        let application_number = parse_whole(&self.application_number)
            .filter(|n| *n >= 1)
            .ok_or_else(|| EntryError::ApplicationNumber(self.application_number.clone()))?;

        let frequency_days = if self.frequency_days.trim().is_empty() {
            0
        } else {
            parse_whole(&self.frequency_days)
                .ok_or_else(|| EntryError::Frequency(self.frequency_days.clone()))?
        };

        let hectares = if self.hectares.trim().is_empty() {
            0.0
        } else {
            parse_number(&self.hectares)
                .filter(|h| *h >= 0.0)
                .ok_or_else(|| EntryError::Hectares(self.hectares.clone()))?
        };

        Ok(Record {
            date: Some(date),
            category_label: category.to_string(),
            category,
            application_number,
            frequency_days: frequency_days as f64,
            hectares,
            product_1: optional_text(&self.product_1),
            product_2: optional_text(&self.product_2),
        })
    }

    /// Validate using the local calendar date as the default.
    pub fn validate(&self) -> Result<Record, EntryError> {
        self.validate_on(chrono::Local::now().date_naive())
    }
}

fn parse_whole(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok()
}

fn optional_text(text: &str) -> Option<String> {
    let t = text.trim();
    (!t.is_empty()).then(|| t.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn entry() -> ManualEntry {
        ManualEntry {
            date: "05/03/2024".into(),
            category: "foliar".into(),
            application_number: "3".into(),
            frequency_days: "14".into(),
            hectares: "12.5".into(),
            product_1: " Urea ".into(),
            product_2: "".into(),
        }
    }

    #[test]
    fn valid_entry_builds_record() {
        let r = entry().validate_on(today()).unwrap();
        assert_eq!(
            r,
            Record {
                date: NaiveDate::from_ymd_opt(2024, 3, 5),
                category: Category::Foliar,
                category_label: "FOLIAR".into(),
                application_number: 3,
                frequency_days: 14.0,
                hectares: 12.5,
                product_1: Some("Urea".into()),
                product_2: None,
            }
        );
    }

    #[test]
    fn blank_date_means_today() {
        let e = ManualEntry { date: "  ".into(), ..entry() };
        assert_eq!(e.validate_on(today()).unwrap().date, Some(today()));
    }

    #[test]
    fn rejects_free_text_category() {
        let e = ManualEntry { category: "riego".into(), ..entry() };
        assert_eq!(e.validate_on(today()), Err(EntryError::Category("riego".into())));
    }

    #[test]
    fn application_number_must_be_positive_integer() {
        for bad in ["0", "-1", "1.5", ""] {
            let e = ManualEntry { application_number: bad.into(), ..entry() };
            assert!(matches!(e.validate_on(today()), Err(EntryError::ApplicationNumber(_))), "{bad}");
        }
    }

    #[test]
    fn frequency_and_hectares_bounds() {
        let e = ManualEntry { frequency_days: "-3".into(), ..entry() };
        assert!(matches!(e.validate_on(today()), Err(EntryError::Frequency(_))));
        let e = ManualEntry { hectares: "-0.5".into(), ..entry() };
        assert!(matches!(e.validate_on(today()), Err(EntryError::Hectares(_))));
        let e = ManualEntry { hectares: "(3+4)".into(), ..entry() };
        assert!(matches!(e.validate_on(today()), Err(EntryError::Hectares(_))));
        let e = ManualEntry { frequency_days: "".into(), hectares: "".into(), ..entry() };
        let r = e.validate_on(today()).unwrap();
        assert_eq!((r.frequency_days, r.hectares), (0.0, 0.0));
    }

    #[test]
    fn bad_date_is_reported() {
        let e = ManualEntry { date: "31/02/2024".into(), ..entry() };
        assert_eq!(e.validate_on(today()), Err(EntryError::Date("31/02/2024".into())));
    }
}
