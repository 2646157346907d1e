//! Integration tests for field-name and value resolution.
//!
//! Exercises declared mappers, derived configuration types, the stock
//! mapper and file-based loading through the public API only.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use chrono::NaiveDate;
use fabryk_fieldmap::{
    DataTypeOptions, FieldMap, FieldMapper, FieldValue, IndexTypeOptions, MappingCatalog,
    MappingConfig, MappingRegistry, MappingSource, default_registry,
};

// ============================================================================
// Helpers
// ============================================================================

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
        None => String::new(),
    }
}

fn fields(pairs: &[(&str, &[&str])]) -> FieldMap {
    pairs
        .iter()
        .map(|(name, values)| {
            (
                name.to_string(),
                values.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

fn knock_knock(value: &str) -> String {
    let name = capitalize(value);
    format!("Knock knock. Who's there? {name}. {name} who?")
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A mapper exercising every declaration form.
fn base_mapper() -> MappingRegistry {
    let mut registry = MappingRegistry::new();
    registry
        .declare_id_field("ident")
        .declare_index_type(
            "searchable",
            IndexTypeOptions::new().suffix("_s").included_by_default(true),
        )
        .declare_index_type("edible", IndexTypeOptions::new().suffix("_food"))
        .declare_index_type_with(
            "laughable",
            IndexTypeOptions::new().suffix("_haha").included_by_default(true),
            |t| {
                t.data_type(
                    "integer",
                    DataTypeOptions::new().suffix("_ihaha").transform(|value, field_name| {
                        value.as_text().map(|v| {
                            format!(
                                "How many {field_name}s does it take to screw in a light bulb? {}.",
                                capitalize(v)
                            )
                            .into()
                        })
                    }),
                )
                .default_data_type(
                    DataTypeOptions::new()
                        .transform(|value, _| value.as_text().map(|v| knock_knock(v).into())),
                );
            },
        )
        .declare_index_type_with("fungible", IndexTypeOptions::new().suffix("_f0"), |t| {
            t.data_type("integer", DataTypeOptions::new().suffix("_f1"))
                .data_type("date", DataTypeOptions::new())
                .default_data_type(DataTypeOptions::new().suffix("_f2"));
        })
        .declare_index_type_with(
            "unstemmed_searchable",
            IndexTypeOptions::new().suffix("_s"),
            |t| {
                t.data_type(
                    "date",
                    DataTypeOptions::new()
                        .transform(|value, _| value.as_text().map(|v| format!("{v} o'clock").into())),
                );
            },
        );
    registry
}

/// A specialization of [`base_mapper`] overriding a few suffixes.
fn derived_mapper() -> MappingRegistry {
    let mut registry = base_mapper().derive();
    registry
        .declare_index_type_with("searchable", IndexTypeOptions::new(), |t| {
            t.data_type("date", DataTypeOptions::new().suffix("_d"));
        })
        .declare_index_type_with("fungible", IndexTypeOptions::new().suffix("_f3"), |t| {
            t.data_type("garble", DataTypeOptions::new().suffix("_f4"))
                .data_type("integer", DataTypeOptions::new().suffix("_f5"));
        });
    registry
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn test_id_field() {
    assert_eq!(base_mapper().id_field(), "ident");
}

#[test]
fn test_name_by_index_type() {
    let mapper = base_mapper();
    assert_eq!(
        mapper.resolve_name("bar", Some("string"), "edible").as_deref(),
        Some("bar_food")
    );
    assert_eq!(
        mapper.resolve_name("bar", Some("string"), "laughable").as_deref(),
        Some("bar_haha")
    );
}

#[test]
fn test_name_defaults_to_searchable() {
    assert_eq!(
        base_mapper()
            .resolve_searchable_name("foo", Some("string"))
            .as_deref(),
        Some("foo_s")
    );
}

#[test]
fn test_name_by_data_type() {
    let mapper = base_mapper();
    let name = |dt| mapper.resolve_name("foo", Some(dt), "fungible");
    assert_eq!(name("integer").as_deref(), Some("foo_f1"));
    assert_eq!(name("garble").as_deref(), Some("foo_f2"));
    assert_eq!(name("date").as_deref(), Some("foo_f0"));
}

#[test]
fn test_name_unknown_index_type() {
    assert_eq!(base_mapper().resolve_name("foo", Some("string"), "blargle"), None);
}

#[test]
fn test_derived_mapper_overrides_selectively() {
    let mapper = derived_mapper();
    let name = |dt, it| mapper.resolve_name("foo", Some(dt), it);
    assert_eq!(name("date", "searchable").as_deref(), Some("foo_d"));
    assert_eq!(name("string", "searchable").as_deref(), Some("foo_s"));
    assert_eq!(name("integer", "fungible").as_deref(), Some("foo_f5"));
    assert_eq!(name("garble", "fungible").as_deref(), Some("foo_f4"));
    assert_eq!(name("fratz", "fungible").as_deref(), Some("foo_f2"));
    assert_eq!(name("date", "fungible").as_deref(), Some("foo_f3"));
}

#[test]
fn test_derived_mapper_leaves_parent_untouched() {
    let parent = base_mapper();
    let _child = derived_mapper();
    assert_eq!(
        parent.resolve_name("foo", Some("date"), "searchable").as_deref(),
        Some("foo_s")
    );
    assert_eq!(
        parent.resolve_name("foo", Some("integer"), "fungible").as_deref(),
        Some("foo_f1")
    );
}

#[test]
fn test_name_without_data_type() {
    assert_eq!(
        default_registry()
            .resolve_name("heifer", None, "searchable")
            .as_deref(),
        Some("heifer_t")
    );
}

// ============================================================================
// Names and values
// ============================================================================

#[test]
fn test_fields_by_index_type() {
    let result = base_mapper().resolve_fields(
        "foo",
        &"bar".into(),
        Some("string"),
        &["searchable", "laughable", "edible"],
    );
    assert_eq!(
        result,
        fields(&[
            ("foo_s", &["bar"]),
            ("foo_food", &["bar"]),
            ("foo_haha", &[knock_knock("bar").as_str()]),
        ])
    );
}

#[test]
fn test_fields_defaults_and_exclusions() {
    let mapper = base_mapper();
    let none: [&str; 0] = [];

    assert_eq!(
        mapper.resolve_fields("foo", &"bar".into(), Some("string"), &none),
        fields(&[
            ("foo_s", &["bar"]),
            ("foo_haha", &[knock_knock("bar").as_str()]),
        ])
    );
    assert_eq!(
        mapper.resolve_fields(
            "foo",
            &"bar".into(),
            Some("string"),
            &["edible", "not_laughable"]
        ),
        fields(&[("foo_s", &["bar"]), ("foo_food", &["bar"])])
    );
    assert!(
        mapper
            .resolve_fields(
                "foo",
                &"bar".into(),
                Some("string"),
                &["not_searchable", "not_laughable"]
            )
            .is_empty()
    );
}

#[test]
fn test_fields_by_data_type() {
    let result = base_mapper().resolve_fields(
        "foo",
        &"bar".into(),
        Some("integer"),
        &["searchable", "laughable"],
    );
    assert_eq!(
        result,
        fields(&[
            ("foo_s", &["bar"]),
            (
                "foo_ihaha",
                &["How many foos does it take to screw in a light bulb? Bar."]
            ),
        ])
    );
}

#[test]
fn test_fields_skip_unknown_index_types() {
    let result = base_mapper().resolve_fields("foo", &"bar".into(), Some("string"), &["blargle"]);
    assert_eq!(
        result,
        fields(&[
            ("foo_s", &["bar"]),
            ("foo_haha", &[knock_knock("bar").as_str()]),
        ])
    );
}

#[test]
fn test_fields_same_name_different_values() {
    let result = base_mapper().resolve_fields(
        "roll",
        &"rock".into(),
        Some("date"),
        &["unstemmed_searchable", "not_laughable"],
    );
    assert_eq!(result, fields(&[("roll_s", &["rock o'clock", "rock"])]));
}

#[test]
fn test_fields_same_name_same_value() {
    let result = base_mapper().resolve_fields(
        "roll",
        &"rock".into(),
        Some("string"),
        &["unstemmed_searchable", "not_laughable"],
    );
    assert_eq!(result, fields(&[("roll_s", &["rock"])]));
}

#[test]
fn test_fields_through_trait_object() {
    let mapper: Box<dyn FieldMapper> = Box::new(base_mapper());
    let result = mapper.resolve_fields("bar", &"x".into(), Some("string"), &["edible".to_string()]);
    assert_eq!(result["bar_food"], ["x"]);
    assert_eq!(mapper.id_field(), "ident");
}

// ============================================================================
// Stock mapper
// ============================================================================

#[test]
fn test_default_mapper_id_field() {
    assert_eq!(default_registry().id_field(), "id");
}

#[test]
fn test_default_mapper_applies_nothing_unrequested() {
    let mapper = default_registry();
    let none: [&str; 0] = [];
    assert!(mapper.resolve_fields("foo", &"bar".into(), Some("string"), &none).is_empty());
    assert!(mapper.resolve_fields("foo", &"1".into(), Some("integer"), &none).is_empty());
}

#[test]
fn test_default_mapper_iso_dates() {
    let mapper = default_registry();
    let date = |value: FieldValue| mapper.resolve_fields("foo", &value, Some("date"), &["searchable"]);
    let expected = fields(&[("foo_dt", &["2012-11-06T00:00:00Z"])]);

    assert_eq!(date("2012-11-06".into()), expected);
    assert_eq!(date("November 6th, 2012".into()), expected);
    assert_eq!(date("6 Nov. 2012".into()), expected);
    assert_eq!(
        date(NaiveDate::from_ymd_opt(2012, 11, 6).unwrap().into()),
        expected
    );
    assert_eq!(date("".into()), fields(&[("foo_dt", &[])]));
}

#[test]
fn test_default_mapper_other_index_types() {
    let result = default_registry().resolve_fields(
        "foo",
        &"bar".into(),
        Some("string"),
        &[
            "searchable",
            "displayable",
            "facetable",
            "sortable",
            "unstemmed_searchable",
        ],
    );
    assert_eq!(
        result,
        fields(&[
            ("foo_t", &["bar"]),
            ("foo_display", &["bar"]),
            ("foo_facet", &["bar"]),
            ("foo_sort", &["bar"]),
            ("foo_unstem_search", &["bar"]),
        ])
    );
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_mappings_from_file() {
    let mut registry = MappingRegistry::new();
    registry
        .load_mappings(MappingSource::Path(fixture("test_mappings.yml")))
        .unwrap();

    assert_eq!(registry.id_field(), "pid");
    let edible = registry.rule("edible").unwrap();
    assert!(edible.is_default());
    assert_eq!(
        edible.data_type(Some("boolean")).and_then(|o| o.suffix()),
        Some("_edible_bool")
    );
    assert_eq!(
        edible.data_type(Some("integer")).and_then(|o| o.suffix()),
        Some("_ii")
    );
    assert_eq!(registry.rule("displayable").unwrap().suffix(), "_dedisplay");
    assert_eq!(registry.rule("facetable").unwrap().suffix(), "_defacet");
    assert_eq!(registry.rule("sortable").unwrap().suffix(), "_desort");
}

#[test]
fn test_load_mappings_default_location() {
    let mut registry = MappingRegistry::new();
    registry.load_mappings(MappingSource::Default).unwrap();

    let config = MappingConfig::default_mappings().unwrap();
    assert_eq!(registry.id_field(), config.id_field);
    let searchable = registry.rule("searchable").unwrap();
    for tag in ["date", "string", "symbol", "integer", "double"] {
        assert!(
            searchable.data_type(Some(tag)).is_some(),
            "searchable should map {tag}"
        );
    }
    assert_eq!(searchable.suffix_for(Some("date")), "_dt");
    assert_eq!(registry.rule("displayable").unwrap().suffix(), "_display");
    assert_eq!(registry.rule("facetable").unwrap().suffix(), "_facet");
    assert_eq!(registry.rule("sortable").unwrap().suffix(), "_sort");
}

#[test]
fn test_reload_wipes_one_type_only() {
    let mut catalog = MappingCatalog::new();
    catalog.define("stock", None).unwrap();
    catalog.define("loading", None).unwrap();

    catalog.load_into("loading", MappingSource::Default).unwrap();
    catalog
        .load_into("loading", fixture("test_mappings.yml").into())
        .unwrap();

    assert!(catalog.get("loading").unwrap().rule("searchable").is_none());
    assert!(catalog.get("stock").unwrap().rule("searchable").is_some());
}

#[test]
fn test_malformed_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yml");
    std::fs::write(&path, "id: pid\nsearchable:\n  date: 7\n").unwrap();

    let mut registry = default_registry();
    let err = registry.load_mappings(MappingSource::Path(path)).unwrap_err();
    assert!(err.is_malformed_configuration());
    assert!(err.to_string().contains("searchable.date"));
    assert!(registry.contains("displayable"));
    assert_eq!(registry.id_field(), "id");
}

#[test]
fn test_missing_file_is_rejected() {
    let mut registry = MappingRegistry::new();
    assert!(
        registry
            .load_mappings(MappingSource::Path(fixture("does_not_exist.yml")))
            .is_err()
    );
}
