//! Schemaless API records and their structured date fields

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Date-valued fields recognized on observations and projects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateField {
    CreatedAt,
    ObservedOn,
    UpdatedAt,
}

impl DateField {
    pub const ALL: [DateField; 3] = [Self::CreatedAt, Self::ObservedOn, Self::UpdatedAt];

    /// JSON key of the field
    pub fn key(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::ObservedOn => "observed_on",
            Self::UpdatedAt => "updated_at",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// A parsed ISO-8601 date or date-time
///
/// The API mixes plain dates (`observed_on`), offset-less local times and
/// fully zoned timestamps, so the shape of the source text is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Calendar date, e.g. `2021-03-04`
    Date(NaiveDate),
    /// Date-time without an offset, e.g. `2021-03-04T10:15:00`
    Local(NaiveDateTime),
    /// Date-time with a UTC offset, e.g. `2021-03-04T10:15:00+01:00`
    Zoned(DateTime<FixedOffset>),
}

const ZONED_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    /// Parse ISO-8601 text, returning `None` if it matches no supported shape
    pub fn parse(text: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(Self::Zoned(dt));
        }
        for format in ZONED_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(text, format) {
                return Some(Self::Zoned(dt));
            }
        }
        for format in LOCAL_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(Self::Local(dt));
            }
        }
        if let Some(dt) = parse_hour_only(text) {
            return Some(Self::Local(dt));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .map(Self::Date)
    }
}

/// `YYYY-MM-DDTHH` or `YYYY-MM-DD HH`, which chrono's format parser rejects
/// for lack of minutes
fn parse_hour_only(text: &str) -> Option<NaiveDateTime> {
    let (date, hour) = text.split_once(['T', ' '])?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(hour.parse().ok()?, 0, 0)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Local(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One observation, project or place as returned by the API
///
/// No schema is enforced. Once normalized, the recognized date fields are
/// held as [`Timestamp`]s and no longer appear among the raw fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub(crate) fields: Map<String, Value>,
    pub(crate) dates: BTreeMap<DateField, Timestamp>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON value of a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Structured value of a date field, if it has been normalized
    pub fn date(&self, field: DateField) -> Option<&Timestamp> {
        self.dates.get(&field)
    }

    /// Set a raw field. Writing a date key discards its structured value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        if let Some(field) = DateField::from_key(&key) {
            self.dates.remove(&field);
        }
        self.fields.insert(key, value.into());
    }

    /// Set an already structured date field
    pub fn set_date(&mut self, field: DateField, timestamp: Timestamp) {
        self.fields.remove(field.key());
        self.dates.insert(field, timestamp);
    }

    /// Numeric `id` of the record
    pub fn id(&self) -> Option<u64> {
        self.fields.get("id").and_then(Value::as_u64)
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            dates: BTreeMap::new(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        for (field, timestamp) in &self.dates {
            map.serialize_entry(field.key(), timestamp)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Record::from)
    }
}

/// One decoded response body
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Page {
    /// List endpoints return an array of records
    Many(Vec<Record>),
    /// Single-entity endpoints return one record
    Single(Record),
}

impl Page {
    pub fn len(&self) -> usize {
        match self {
            Self::Many(records) => records.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::Many(records) => records,
            Self::Single(record) => vec![record],
        }
    }
}
