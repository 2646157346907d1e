//! Structured mapping configuration.
//!
//! Mapping files are YAML (JSON works too, being a YAML subset):
//!
//! ```yaml
//! id: id
//! searchable:
//!   default: _t        # default data-type suffix
//!   date: _dt
//!   symbol: _s
//! displayable: _display  # container suffix only
//! ```
//!
//! A top-level value that is a mapping configures per-data-type suffixes for
//! that index type. Inside it, the reserved `default` tag is either the
//! default data-type suffix (string) or the index type's default-inclusion
//! flag (boolean). A bare string configures only a container suffix.
//!
//! Parsing produces a [`MappingConfig`]; anything not matching this shape is
//! rejected with [`Error::MalformedConfiguration`](fabryk_core::Error).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fabryk_core::{Error, Result};
use serde_yaml::Value;

/// Top-level key holding the id field name.
pub const ID_KEY: &str = "id";

/// Reserved data-type tag inside an index-type mapping.
pub const DEFAULT_TAG: &str = "default";

/// Mapping file used when no source is given.
pub const DEFAULT_MAPPINGS_YAML: &str = include_str!("../config/field_mappings.yml");

/// Parsed, validated mapping configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingConfig {
    /// Document id field name.
    pub id_field: String,
    /// Index types by name.
    pub index_types: BTreeMap<String, IndexTypeConfig>,
}

/// Configuration for one index type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexTypeConfig {
    /// Container suffix only.
    Suffix(String),
    /// Per-data-type suffixes.
    DataTypes {
        /// Default-inclusion flag (`default: true`).
        default: Option<bool>,
        /// Default data-type suffix (`default: _t`).
        default_suffix: Option<String>,
        /// Suffix per data-type tag.
        suffixes: BTreeMap<String, String>,
    },
}

impl MappingConfig {
    /// Parse a YAML (or JSON) document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)
            .map_err(|e| Error::parse(format!("Failed to parse mapping configuration: {e}")))?;
        Self::from_value(&value)
    }

    /// Read and parse a mapping file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        log::info!("Loading field mappings from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// The built-in mapping file.
    pub fn default_mappings() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_MAPPINGS_YAML)
    }

    /// Validate a structured value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Mapping(root) = value else {
            return Err(Error::malformed(
                "mapping configuration must be a mapping of index types",
            ));
        };

        let mut id_field = None;
        let mut index_types = BTreeMap::new();

        for (key, value) in root {
            let key = key_string(key, None)?;
            if key == ID_KEY {
                let Value::String(id) = value else {
                    return Err(Error::malformed_key(ID_KEY, "id field must be a string"));
                };
                id_field = Some(id.clone());
                continue;
            }
            let index_type = parse_index_type(&key, value)?;
            index_types.insert(key, index_type);
        }

        let id_field = id_field
            .ok_or_else(|| Error::malformed_key(ID_KEY, "required id field is missing"))?;

        Ok(Self {
            id_field,
            index_types,
        })
    }
}

fn parse_index_type(name: &str, value: &Value) -> Result<IndexTypeConfig> {
    match value {
        Value::String(suffix) => Ok(IndexTypeConfig::Suffix(suffix.clone())),
        Value::Mapping(tags) => {
            let mut default = None;
            let mut default_suffix = None;
            let mut suffixes = BTreeMap::new();

            for (tag, suffix) in tags {
                let tag = key_string(tag, Some(name))?;
                match (tag.as_str(), suffix) {
                    (DEFAULT_TAG, Value::Bool(flag)) => default = Some(*flag),
                    (DEFAULT_TAG, Value::String(s)) => default_suffix = Some(s.clone()),
                    (_, Value::String(s)) => {
                        suffixes.insert(tag, s.clone());
                    }
                    _ => {
                        return Err(Error::malformed_key(
                            format!("{name}.{tag}"),
                            "data-type suffix must be a string",
                        ));
                    }
                }
            }

            Ok(IndexTypeConfig::DataTypes {
                default,
                default_suffix,
                suffixes,
            })
        }
        _ => Err(Error::malformed_key(
            name,
            "index type must be a suffix string or a mapping of data types to suffixes",
        )),
    }
}

fn key_string(key: &Value, parent: Option<&str>) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => {
            let shown = serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            let location = match parent {
                Some(parent) => format!("{parent}.{shown}"),
                None => shown,
            };
            Err(Error::malformed_key(location, "keys must be strings"))
        }
    }
}

// ============================================================================
// MappingSource
// ============================================================================

/// Where [`MappingRegistry::load_mappings`](crate::MappingRegistry::load_mappings)
/// reads from.
#[derive(Debug, Clone, Default)]
pub enum MappingSource {
    /// The built-in mapping file.
    #[default]
    Default,
    /// A YAML or JSON file on disk.
    Path(PathBuf),
    /// An already-parsed structured value.
    Value(Value),
    /// An already-validated configuration.
    Config(MappingConfig),
}

impl MappingSource {
    /// Source for an optional path: the file if given, else the built-in one.
    pub fn from_optional_path(path: Option<impl Into<PathBuf>>) -> Self {
        match path {
            Some(path) => MappingSource::Path(path.into()),
            None => MappingSource::Default,
        }
    }

    /// Read and validate the configuration.
    pub fn resolve(self) -> Result<MappingConfig> {
        match self {
            MappingSource::Default => MappingConfig::default_mappings(),
            MappingSource::Path(path) => MappingConfig::from_path(path),
            MappingSource::Value(value) => MappingConfig::from_value(&value),
            MappingSource::Config(config) => Ok(config),
        }
    }
}

impl From<MappingConfig> for MappingSource {
    fn from(config: MappingConfig) -> Self {
        MappingSource::Config(config)
    }
}

impl From<PathBuf> for MappingSource {
    fn from(path: PathBuf) -> Self {
        MappingSource::Path(path)
    }
}

impl From<&Path> for MappingSource {
    fn from(path: &Path) -> Self {
        MappingSource::Path(path.to_path_buf())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_mappings_parse() {
        let config = MappingConfig::default_mappings().unwrap();
        assert_eq!(config.id_field, "id");
        assert_eq!(
            config.index_types.get("displayable"),
            Some(&IndexTypeConfig::Suffix("_display".to_string()))
        );
        let Some(IndexTypeConfig::DataTypes {
            default_suffix,
            suffixes,
            ..
        }) = config.index_types.get("searchable")
        else {
            unreachable!("searchable should map data types");
        };
        assert_eq!(default_suffix.as_deref(), Some("_t"));
        assert_eq!(suffixes.get("date").map(String::as_str), Some("_dt"));
    }

    #[test]
    fn test_default_tag_flag_and_suffix() {
        let config =
            MappingConfig::from_yaml_str("id: pid\nedible:\n  default: true\n  boolean: _eb\n")
                .unwrap();
        assert_eq!(
            config.index_types.get("edible"),
            Some(&IndexTypeConfig::DataTypes {
                default: Some(true),
                default_suffix: None,
                suffixes: BTreeMap::from([("boolean".to_string(), "_eb".to_string())]),
            })
        );
    }

    #[test]
    fn test_json_is_accepted() {
        let config = MappingConfig::from_yaml_str(r#"{"id": "pid", "sortable": "_sort"}"#).unwrap();
        assert_eq!(config.id_field, "pid");
        assert_eq!(config.index_types.len(), 1);
    }

    #[test]
    fn test_missing_id_is_malformed() {
        let err = MappingConfig::from_yaml_str("searchable: _t\n").unwrap_err();
        assert!(err.is_malformed_configuration());
        assert!(err.to_string().contains("'id'"));
    }

    #[test]
    fn test_non_string_id_is_malformed() {
        let err = MappingConfig::from_yaml_str("id: [a, b]\n").unwrap_err();
        assert!(err.is_malformed_configuration());
    }

    #[test]
    fn test_non_mapping_root_is_malformed() {
        let err = MappingConfig::from_yaml_str("- id\n- searchable\n").unwrap_err();
        assert!(err.is_malformed_configuration());
    }

    #[test]
    fn test_bad_index_type_value_names_key() {
        let err = MappingConfig::from_yaml_str("id: id\nsearchable: 42\n").unwrap_err();
        assert!(err.to_string().contains("'searchable'"));
    }

    #[test]
    fn test_bad_data_type_value_names_key() {
        let err =
            MappingConfig::from_yaml_str("id: id\nsearchable:\n  date: [_dt]\n").unwrap_err();
        assert!(err.to_string().contains("'searchable.date'"));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = MappingConfig::from_yaml_str("id: [unclosed\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id: pid\nfacetable: _facet").unwrap();

        let config = MappingConfig::from_path(file.path()).unwrap();
        assert_eq!(config.id_field, "pid");
    }

    #[test]
    fn test_from_missing_path() {
        let err = MappingConfig::from_path("/nonexistent/field_mappings.yml").unwrap_err();
        assert!(matches!(err, Error::IoWithPath { .. }));
    }

    #[test]
    fn test_source_from_optional_path() {
        assert!(matches!(
            MappingSource::from_optional_path(None::<PathBuf>),
            MappingSource::Default
        ));
        assert!(matches!(
            MappingSource::from_optional_path(Some("mappings.yml")),
            MappingSource::Path(_)
        ));
    }
}
