//! Value normalization.
//!
//! Every value that lands in an [`IndexDocument`] passes through
//! [`normalize`] first:
//!
//! - absent values become the empty string
//! - dates and timestamps become UTC ISO-8601 (`YYYY-MM-DDTHH:MM:SSZ`)
//! - text has each whitespace run collapsed to a single space and is trimmed
//! - list items are normalized individually and joined with a single space
//!
//! # Example
//!
//! ```rust
//! use fabryk_fieldmap::{FieldValue, normalize};
//!
//! let value = FieldValue::from(vec![" test ", "     \n   node ", "   \t value \t"]);
//! assert_eq!(normalize(Some(&value)), "test node value");
//! assert_eq!(normalize(None), "");
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use crate::document::IndexDocument;
use crate::value::FieldValue;

/// Output format for temporal values.
pub const ISO_8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Normalize a raw value into its indexed string form.
pub fn normalize(value: Option<&FieldValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    let mut parts = Vec::new();
    push_normalized(value, &mut parts);
    parts.join(" ")
}

/// Normalize `value` and append it to `field_name` in `document`.
///
/// The field is created if missing. Existing entries are never replaced or
/// reordered.
pub fn insert<'d>(
    document: &'d mut IndexDocument,
    field_name: &str,
    value: Option<&FieldValue>,
) -> &'d mut IndexDocument {
    let normalized = normalize(value);
    document.push_normalized(field_name, normalized);
    document
}

/// Collapse every whitespace run to one space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format a calendar date as midnight UTC.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%dT00:00:00Z").to_string()
}

/// Format a timestamp in UTC at second precision.
pub fn format_datetime(timestamp: DateTime<Utc>) -> String {
    timestamp.format(ISO_8601_FORMAT).to_string()
}

fn push_normalized(value: &FieldValue, parts: &mut Vec<String>) {
    match value {
        FieldValue::Text(text) => parts.push(collapse_whitespace(text)),
        FieldValue::Date(date) => parts.push(format_date(*date)),
        FieldValue::DateTime(timestamp) => parts.push(format_datetime(*timestamp)),
        FieldValue::List(items) => {
            for item in items {
                push_normalized(item, parts);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use proptest::prelude::*;

    // ------------------------------------------------------------------------
    // normalize tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_normalize_absent() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn test_normalize_list_joins_with_single_space() {
        let value = FieldValue::from(vec![" a  b ", " c\t"]);
        assert_eq!(normalize(Some(&value)), "a b c");
    }

    #[test]
    fn test_normalize_single_item_list() {
        let value = FieldValue::from(vec![" test    \n   node    \t value \t"]);
        assert_eq!(normalize(Some(&value)), "test node value");
    }

    #[test]
    fn test_normalize_scalar_text() {
        let value = FieldValue::from("raw  string\n with whitespace");
        assert_eq!(normalize(Some(&value)), "raw string with whitespace");
    }

    #[test]
    fn test_normalize_list_keeps_blank_items() {
        let value = FieldValue::from(vec!["a", "", "b"]);
        assert_eq!(normalize(Some(&value)), "a  b");

        let value = FieldValue::from(vec!["  ", "a"]);
        assert_eq!(normalize(Some(&value)), " a");
    }

    #[test]
    fn test_normalize_empty_list() {
        let value = FieldValue::List(Vec::new());
        assert_eq!(normalize(Some(&value)), "");
    }

    #[test]
    fn test_normalize_date() {
        let date = NaiveDate::from_ymd_opt(2012, 11, 6).unwrap();
        assert_eq!(normalize(Some(&date.into())), "2012-11-06T00:00:00Z");
    }

    #[test]
    fn test_normalize_datetime_drops_subseconds() {
        let timestamp = Utc
            .with_ymd_and_hms(2007, 2, 1, 13, 45, 9)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(normalize(Some(&timestamp.into())), "2007-02-01T13:45:09Z");
    }

    #[test]
    fn test_normalize_mixed_list() {
        let date = NaiveDate::from_ymd_opt(2007, 2, 15).unwrap();
        let value = FieldValue::List(vec![FieldValue::from(" issued "), date.into()]);
        assert_eq!(normalize(Some(&value)), "issued 2007-02-15T00:00:00Z");
    }

    // ------------------------------------------------------------------------
    // insert tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_insert_creates_field() {
        let mut doc = IndexDocument::new();
        insert(&mut doc, "my_field", Some(&"Frank".into()));
        assert_eq!(doc.get("my_field"), Some(&["Frank".to_string()][..]));
    }

    #[test]
    fn test_insert_appends_in_call_order() {
        let mut doc = IndexDocument::new();
        insert(&mut doc, "f", Some(&"Frank".into()));
        insert(&mut doc, "f", Some(&"Bing".into()));
        assert_eq!(
            doc.get("f"),
            Some(&["Frank".to_string(), "Bing".to_string()][..])
        );
    }

    #[test]
    fn test_insert_normalizes() {
        let mut doc = IndexDocument::new();
        insert(&mut doc, "f", Some(&"  spaced   out ".into()));
        insert(&mut doc, "f", None);
        assert_eq!(
            doc.get("f"),
            Some(&["spaced out".to_string(), String::new()][..])
        );
    }

    #[test]
    fn test_insert_chains() {
        let mut doc = IndexDocument::new();
        insert(&mut doc, "a", Some(&"1".into()))
            .insert("b", "2")
            .insert("a", "3");
        assert_eq!(doc.get("a").map(<[String]>::len), Some(2));
        assert_eq!(doc.get("b").map(<[String]>::len), Some(1));
    }

    // ------------------------------------------------------------------------
    // Property tests
    // ------------------------------------------------------------------------

    proptest! {
        #[test]
        fn test_normalized_text_has_no_whitespace_runs(s in "\\PC*") {
            let normalized = normalize(Some(&FieldValue::from(s.as_str())));
            prop_assert!(!normalized.contains("  "));
            prop_assert_eq!(normalized.trim(), normalized.as_str());
            prop_assert!(!normalized.contains('\t'));
            prop_assert!(!normalized.contains('\n'));
        }

        #[test]
        fn test_normalize_is_idempotent(s in "\\PC*") {
            let once = normalize(Some(&FieldValue::from(s.as_str())));
            let twice = normalize(Some(&FieldValue::from(once.as_str())));
            prop_assert_eq!(once, twice);
        }
    }
}
