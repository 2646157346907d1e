//! Raw field values.
//!
//! A [`FieldValue`] is what a record hands to the resolver before any
//! transform or normalization runs: plain text, a calendar date, a UTC
//! timestamp, or a list of those.

use chrono::{DateTime, NaiveDate, Utc};

/// A raw value to be indexed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free text, normalized by whitespace collapsing.
    Text(String),
    /// Calendar date, normalized to midnight UTC.
    Date(NaiveDate),
    /// Point in time, normalized to second precision UTC.
    DateTime(DateTime<Utc>),
    /// Several values joined into one field entry.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Text content if this is a [`FieldValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns `true` for empty text or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Date(_) | FieldValue::DateTime(_) => false,
        }
    }

    /// Returns `true` for date and date-time values.
    pub fn is_temporal(&self) -> bool {
        matches!(self, FieldValue::Date(_) | FieldValue::DateTime(_))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        FieldValue::Date(date)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(timestamp: DateTime<Utc>) -> Self {
        FieldValue::DateTime(timestamp)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}
