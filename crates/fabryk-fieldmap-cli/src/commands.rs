//! Handler functions for `fieldmap` subcommands.
//!
//! Handlers return their rendered output so callers decide where it goes;
//! `main` prints it to stdout.

use std::path::{Path, PathBuf};

use fabryk_core::{Error, Result};
use fabryk_fieldmap::{
    DataTypeOverride, FieldMapper, FieldValue, IndexDocument, IndexTypeRule, MappingRegistry,
    MappingSource, default_registry,
};
use fabryk_terms::{DocumentBuilder, Terminology, XmlRecord};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::cli::Command;
use crate::config::Settings;

// ============================================================================
// Dispatch
// ============================================================================

/// Run one subcommand against the effective settings.
pub fn run(command: Command, settings: &Settings) -> Result<String> {
    let registry = load_registry(settings)?;
    let pretty = settings.output.pretty;

    match command {
        Command::Build {
            record,
            terminology,
            id,
        } => {
            let terminology = terminology
                .or_else(|| settings.terminology.clone())
                .ok_or_else(|| {
                    Error::config(
                        "No terminology given; pass --terminology or set `terminology` in the settings file",
                    )
                })?;
            cmd_build(
                &registry,
                &expand_home(&record),
                &expand_home(&terminology),
                id.as_deref(),
                pretty,
            )
        }
        Command::Name {
            base,
            data_type,
            index_type,
        } => cmd_name(&registry, &base, data_type.as_deref(), &index_type),
        Command::Fields {
            base,
            value,
            data_type,
            index_as,
        } => cmd_fields(&registry, &base, &value, data_type.as_deref(), &index_as, pretty),
        Command::Show => cmd_show(&registry, pretty),
    }
}

/// The mapper named by the settings, or the stock mapper.
///
/// Mapping files carry suffixes only, so a registry loaded from a file has no
/// value transforms.
pub fn load_registry(settings: &Settings) -> Result<MappingRegistry> {
    match &settings.mappings {
        Some(path) => {
            let mut registry = MappingRegistry::new();
            registry.load_mappings(MappingSource::Path(expand_home(path)))?;
            Ok(registry)
        }
        None => Ok(default_registry()),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Build an index document from an XML record file.
pub fn cmd_build<M: FieldMapper + ?Sized>(
    mapper: &M,
    record: &Path,
    terminology: &Path,
    id: Option<&str>,
    pretty: bool,
) -> Result<String> {
    let terminology = Terminology::from_path(terminology)?;
    let xml = std::fs::read_to_string(record).map_err(|e| Error::io_with_path(e, record))?;
    let record = XmlRecord::parse(&xml, terminology)?;

    let mut document = IndexDocument::new();
    if let Some(id) = id {
        document.insert(mapper.id_field(), id);
    }
    let document = DocumentBuilder::new(mapper).build_into(&record, document);
    tracing::debug!(fields = document.len(), "Built index document");

    to_json(&document, pretty)
}

/// Resolve one field name.
pub fn cmd_name<M: FieldMapper + ?Sized>(
    mapper: &M,
    base: &str,
    data_type: Option<&str>,
    index_type: &str,
) -> Result<String> {
    mapper
        .resolve_name(base, data_type, index_type)
        .ok_or_else(|| Error::config(format!("Index type '{index_type}' is not declared")))
}

/// Resolve every field for one value.
pub fn cmd_fields<M: FieldMapper + ?Sized>(
    mapper: &M,
    base: &str,
    value: &str,
    data_type: Option<&str>,
    index_as: &[String],
    pretty: bool,
) -> Result<String> {
    let fields = mapper.resolve_fields(base, &FieldValue::from(value), data_type, index_as);
    to_json(&fields, pretty)
}

/// Render the registry's effective mappings.
pub fn cmd_show(registry: &MappingRegistry, pretty: bool) -> Result<String> {
    let index_types: Map<String, Value> = registry
        .rules()
        .map(|rule| (rule.name().to_string(), describe_rule(rule)))
        .collect();
    let shown = json!({
        "id": registry.id_field(),
        "index_types": index_types,
    });
    to_json(&shown, pretty)
}

fn describe_rule(rule: &IndexTypeRule) -> Value {
    let data_types: Map<String, Value> = rule
        .data_type_tags()
        .filter_map(|tag| {
            rule.data_type(Some(tag))
                .map(|over| (tag.to_string(), describe_override(over)))
        })
        .collect();

    let mut shown = json!({
        "default": rule.is_default(),
        "suffix": rule.suffix(),
        "transform": rule.transform().is_some(),
        "data_types": data_types,
    });
    if let Some(over) = rule.default_data_type() {
        shown["default_data_type"] = describe_override(over);
    }
    if let Some(over) = rule.data_type(None) {
        shown["untyped"] = describe_override(over);
    }
    shown
}

fn describe_override(over: &DataTypeOverride) -> Value {
    json!({
        "suffix": over.suffix(),
        "transform": over.transform().is_some(),
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.map_err(|e| Error::parse(format!("Failed to render JSON: {e}")))
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

// ============================================================================
// Tests
// ============================================================================
