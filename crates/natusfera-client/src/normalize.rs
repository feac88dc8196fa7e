//! Conversion of ISO-8601 date fields into structured timestamps

use serde_json::Value;

use crate::error::FormatError;
use crate::record::{DateField, Page, Record, Timestamp};

/// Parse the recognized date fields of a single record
///
/// Absent and `null` fields are skipped, as are fields that already hold a
/// structured value, so normalizing twice is the same as normalizing once.
pub fn normalize_one(record: &mut Record) -> Result<(), FormatError> {
    for field in DateField::ALL {
        if record.dates.contains_key(&field) {
            continue;
        }
        let timestamp = match record.fields.get(field.key()) {
            None | Some(Value::Null) => continue,
            Some(Value::String(text)) => Timestamp::parse(text).ok_or_else(|| FormatError {
                field,
                value: text.clone(),
            })?,
            Some(other) => {
                return Err(FormatError {
                    field,
                    value: other.to_string(),
                })
            }
        };
        record.set_date(field, timestamp);
    }
    Ok(())
}

/// Parse the recognized date fields of every record, stopping at the first failure
pub fn normalize_many(records: &mut [Record]) -> Result<(), FormatError> {
    records.iter_mut().try_for_each(normalize_one)
}

/// Normalize whichever shape a response body decoded into
pub fn normalize_page(page: &mut Page) -> Result<(), FormatError> {
    match page {
        Page::Many(records) => normalize_many(records),
        Page::Single(record) => normalize_one(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalizes_all_recognized_fields() {
        let mut obs = record(json!({
            "id": 1,
            "created_at": "2021-03-04T10:15:00+01:00",
            "observed_on": "2021-03-04",
            "updated_at": "2021-03-05T08:00:00Z",
            "time_observed_at": "2021-03-04T09:00:00+01:00"
        }));
        normalize_one(&mut obs).unwrap();

        for field in DateField::ALL {
            assert!(obs.date(field).is_some(), "{} not normalized", field.key());
            assert!(obs.get(field.key()).is_none());
        }
        // Unrecognized date-looking fields stay raw
        assert_eq!(
            obs.get("time_observed_at"),
            Some(&json!("2021-03-04T09:00:00+01:00"))
        );
    }

    #[test]
    fn test_missing_and_null_fields_are_skipped() {
        let mut obs = record(json!({ "id": 1, "observed_on": null }));
        normalize_one(&mut obs).unwrap();
        assert!(obs.date(DateField::ObservedOn).is_none());
        assert!(obs.date(DateField::CreatedAt).is_none());
        assert_eq!(obs.get("observed_on"), Some(&Value::Null));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let mut once = record(json!({
            "created_at": "2021-03-04T10:15:00+01:00",
            "observed_on": "2021-03-04"
        }));
        normalize_one(&mut once).unwrap();

        let mut twice = once.clone();
        normalize_one(&mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_structured_fields_are_left_unchanged() {
        let kept = Timestamp::parse("2000-01-01").unwrap();
        let mut obs = Record::new();
        obs.set_date(DateField::UpdatedAt, kept);
        normalize_one(&mut obs).unwrap();
        assert_eq!(obs.date(DateField::UpdatedAt), Some(&kept));
    }

    #[test]
    fn test_malformed_text_is_a_format_error() {
        let mut obs = record(json!({ "observed_on": "4th of March" }));
        let err = normalize_one(&mut obs).unwrap_err();
        assert_eq!(err.field, DateField::ObservedOn);
        assert_eq!(err.value, "4th of March");
    }

    #[test]
    fn test_non_text_value_is_a_format_error() {
        let mut obs = record(json!({ "created_at": 1614850500 }));
        let err = normalize_one(&mut obs).unwrap_err();
        assert_eq!(err.field, DateField::CreatedAt);
        assert_eq!(err.value, "1614850500");
    }

    #[test]
    fn test_normalize_many_covers_every_record() {
        let mut records = vec![
            record(json!({ "id": 1, "observed_on": "2021-01-01" })),
            record(json!({ "id": 2 })),
            record(json!({ "id": 3, "observed_on": "2021-01-03" })),
        ];
        normalize_many(&mut records).unwrap();
        assert!(records[0].date(DateField::ObservedOn).is_some());
        assert!(records[1].date(DateField::ObservedOn).is_none());
        assert!(records[2].date(DateField::ObservedOn).is_some());
    }

    #[test]
    fn test_normalize_page_single_and_many() {
        let mut single = Page::Single(record(json!({ "updated_at": "2021-01-01" })));
        normalize_page(&mut single).unwrap();
        let mut many = Page::Many(vec![record(json!({ "updated_at": "2021-01-01" }))]);
        normalize_page(&mut many).unwrap();

        for page in [single, many] {
            let records = page.into_records();
            assert!(records[0].date(DateField::UpdatedAt).is_some());
        }
    }
}
