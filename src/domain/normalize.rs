//! Conversion of raw form fields into canonical records.
//!
//! All functions here are pure; the caller supplies the insertion date.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::record::Record;

/// Raw fields of the "add record" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordForm {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub level: Option<String>,
}

/// Raw fields of the catalog lookup form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupForm {
    pub name: Option<String>,
}

/// Reasons a submitted record is rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Name must not be empty")]
    EmptyName,

    #[error("Level must be a whole number (got '{0}')")]
    InvalidLevel(String),
}

/// Canonical form of an entry name: trimmed and lower-cased.
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parse a submitted level as a base-10 integer, ignoring surrounding whitespace.
pub fn parse_level(raw: &str) -> Result<i64, ValidationError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidLevel(raw.to_string()))
}

/// Date stamp stored with each record (`M/D/YYYY`).
pub fn format_date_added(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// Build a record from submitted form fields.
///
/// `name` is trimmed and lower-cased, `type` passes through unchanged and
/// `level` must parse as an integer.
pub fn normalize_record_input(
    form: RecordForm,
    added_on: NaiveDate,
) -> Result<Record, ValidationError> {
    let raw_name = form.name.ok_or(ValidationError::MissingField("name"))?;
    let category = form.category.ok_or(ValidationError::MissingField("type"))?;
    let raw_level = form.level.ok_or(ValidationError::MissingField("level"))?;

    let name = normalize_name(&raw_name);
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    Ok(Record {
        name,
        category,
        level: parse_level(&raw_level)?,
        date_added: format_date_added(added_on),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
    }

    fn form(name: &str, category: &str, level: &str) -> RecordForm {
        RecordForm {
            name: Some(name.into()),
            category: Some(category.into()),
            level: Some(level.into()),
        }
    }

    #[test]
    fn test_normalizes_fields() {
        let record = normalize_record_input(form("  PikaChu ", "Electric Mouse", " 25 "), day())
            .unwrap();
        assert_eq!(record.name, "pikachu");
        assert_eq!(record.category, "Electric Mouse");
        assert_eq!(record.level, 25);
        assert_eq!(record.date_added, "3/4/2025");
    }

    #[test]
    fn test_category_passes_through_untouched() {
        let record = normalize_record_input(form("eevee", "  Normal ", "5"), day()).unwrap();
        assert_eq!(record.category, "  Normal ");
    }

    #[test]
    fn test_negative_and_signed_levels() {
        assert_eq!(parse_level("-3"), Ok(-3));
        assert_eq!(parse_level("+7"), Ok(7));
    }

    #[test]
    fn test_rejects_non_integer_level() {
        for bad in ["", "abc", "12.5", "1e3", "NaN"] {
            assert_eq!(
                normalize_record_input(form("mew", "Psychic", bad), day()),
                Err(ValidationError::InvalidLevel(bad.to_string())),
                "level {:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_blank_name() {
        assert_eq!(
            normalize_record_input(form("   ", "Ghost", "1"), day()),
            Err(ValidationError::EmptyName)
        );
    }

    #[test]
    fn test_missing_fields() {
        let mut partial = form("ditto", "Normal", "10");
        partial.category = None;
        assert_eq!(
            normalize_record_input(partial, day()),
            Err(ValidationError::MissingField("type"))
        );

        assert_eq!(
            normalize_record_input(RecordForm::default(), day()),
            Err(ValidationError::MissingField("name"))
        );
    }

    #[test]
    fn test_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date_added(date), "12/31/2024");
    }
}
