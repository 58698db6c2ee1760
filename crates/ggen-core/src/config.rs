use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// How unrecognized or repeated modifier/helper tags are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagPolicy {
    /// Unknown tags are dropped, duplicates are kept.
    #[default]
    Lenient,
    /// Unknown and duplicate tags are configuration errors.
    Strict,
}

impl TagPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            TagPolicy::Strict
        } else {
            TagPolicy::Lenient
        }
    }
}

/// Raw, unvalidated parameters for one entity, from flags or a manifest entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EntityConfig {
    /// Child item type name, used by collection helpers.
    pub item: String,
    /// Emit the `Conf()` method.
    pub conf: bool,
    /// The entity is a collection.
    pub coll: bool,
    pub mods: Vec<String>,
    pub helpers: Vec<String>,
}

/// Batch manifest loaded from `ggen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GgenConfig {
    /// Explicit package name; derived from the output directory when absent.
    pub package: Option<String>,
    pub output: String,
    pub strict: bool,
    /// Entity name to its parameters, generated in declaration order.
    pub entities: IndexMap<String, EntityConfig>,
}

impl Default for GgenConfig {
    fn default() -> Self {
        Self {
            package: None,
            output: ".".to_string(),
            strict: false,
            entities: IndexMap::new(),
        }
    }
}

/// Default manifest file name.
pub const CONFIG_FILE_NAME: &str = "ggen.yaml";

/// Split a comma separated tag list. An empty input yields no tags.
pub fn split_tags(list: &str) -> Vec<String> {
    if list.is_empty() {
        return Vec::new();
    }
    list.split(',').map(String::from).collect()
}

/// Load a manifest from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<GgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(config))
}

/// Parse manifest YAML.
pub fn parse_config(content: &str) -> Result<GgenConfig, serde_yaml_ng::Error> {
    serde_yaml_ng::from_str(content)
}

/// Generate the default manifest content.
pub fn default_config_content() -> &'static str {
    r#"# ggen manifest: run `ggen batch` to regenerate every entity below
# package: api        # defaults to the output directory name
output: .
strict: false         # reject unknown or repeated mods/helpers

entities:
  Web:
    conf: true
    mods: [Select, Expand]
    helpers: [Data, Normalized, ToMap]
  Files:
    item: File
    coll: true
    conf: true
    mods: [Select, Expand, Filter, Top, OrderBy]
    helpers: [Data, Normalized, ToMap]
"#
}
