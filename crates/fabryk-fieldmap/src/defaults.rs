//! The stock mapping registry.
//!
//! [`default_registry`] is what a configuration type starts from when it
//! declares nothing of its own. Its `searchable` index type carries a date
//! transform that accepts the loose date spellings found in catalog records
//! ("2012-11-06", "November 6th, 2012", "6 Nov. 2012") and emits a calendar
//! date, which the normalizer renders as ISO-8601.
//!
//! ```rust
//! use fabryk_fieldmap::defaults::default_registry;
//!
//! let registry = default_registry();
//! let fields = registry.resolve_fields("foo", &"November 6th, 2012".into(), Some("date"), &["searchable"]);
//! assert_eq!(fields["foo_dt"], ["2012-11-06T00:00:00Z"]);
//! ```

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::registry::MappingRegistry;
use crate::rule::{DataTypeOptions, IndexTypeOptions};
use crate::value::FieldValue;

static ORDINAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").expect("Invalid ordinal regex"));

static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})$").expect("Invalid year-month regex"));

/// Formats tried, in order, after punctuation is reduced to spaces.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y %m %d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d %Y",
    "%d %B %Y",
    "%Y %B %d",
    "%A %B %d %Y",
    "%A %d %B %Y",
];

/// Month-and-year spellings, read as the first of the month.
const MONTH_FORMATS: &[&str] = &["%B %Y", "%Y %B"];

/// Searchable suffixes per data type, besides the `_t` default.
const SEARCHABLE_SUFFIXES: &[(&str, &str)] = &[
    ("string", "_t"),
    ("text", "_t"),
    ("symbol", "_s"),
    ("integer", "_i"),
    ("long", "_l"),
    ("boolean", "_b"),
    ("float", "_f"),
    ("double", "_d"),
];

/// Build the stock registry.
///
/// No index type is applied by default: callers ask for what they want.
pub fn default_registry() -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry
        .declare_id_field("id")
        .declare_index_type_with("searchable", IndexTypeOptions::new(), |t| {
            t.data_type(
                "date",
                DataTypeOptions::new().suffix("_dt").transform(date_transform),
            );
            for (tag, suffix) in SEARCHABLE_SUFFIXES {
                t.data_type(tag, DataTypeOptions::new().suffix(*suffix));
            }
            t.default_data_type(DataTypeOptions::new().suffix("_t"));
        })
        .declare_index_type("displayable", IndexTypeOptions::new().suffix("_display"))
        .declare_index_type("facetable", IndexTypeOptions::new().suffix("_facet"))
        .declare_index_type("sortable", IndexTypeOptions::new().suffix("_sort"))
        .declare_index_type(
            "unstemmed_searchable",
            IndexTypeOptions::new().suffix("_unstem_search"),
        );
    registry
}

/// Transform used for `date` values: calendar dates and timestamps pass
/// through, text is parsed leniently, anything unparseable yields no value.
pub fn date_transform(value: &FieldValue, field_name: &str) -> Option<FieldValue> {
    match value {
        FieldValue::Date(_) | FieldValue::DateTime(_) => Some(value.clone()),
        FieldValue::Text(text) => {
            let parsed = parse_datetime(text)
                .map(FieldValue::DateTime)
                .or_else(|| parse_date(text).map(FieldValue::Date));
            if parsed.is_none() && !text.trim().is_empty() {
                log::debug!("Unparseable date value '{text}'");
            }
            parsed
        }
        FieldValue::List(items) => {
            let dates: Vec<FieldValue> = items
                .iter()
                .filter_map(|item| date_transform(item, field_name))
                .collect();
            (!dates.is_empty()).then_some(FieldValue::List(dates))
        }
    }
}

/// Parse an RFC 3339 timestamp.
pub fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Parse a calendar date written in any of the common catalog spellings.
///
/// Ordinal day suffixes and punctuation are ignored; month names may be full
/// or abbreviated. A month without a day (`2012-11`, `FEB. 2007`) is read as
/// the first of the month.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_MONTH_RE.captures(trimmed) {
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    let cleaned = ORDINAL_RE.replace_all(trimmed, "$1");
    let cleaned: String = cleaned
        .chars()
        .map(|c| if matches!(c, ',' | '.') { ' ' } else { c })
        .collect();
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
        .or_else(|| {
            let first_of_month = format!("{cleaned} 1");
            MONTH_FORMATS.iter().find_map(|format| {
                NaiveDate::parse_from_str(&first_of_month, &format!("{format} %d")).ok()
            })
        })
}

// ============================================================================
// Tests
// ============================================================================
