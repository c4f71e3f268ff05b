//! Resource Registry - Load resource definitions from JSON
//!
//! This module loads the naming table (`resourceDefinition.json`) either from a
//! file on disk or from the copy embedded in the binary, and provides lookup
//! functions for the rest of the application.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Naming table compiled into the binary
const BUNDLED_DEFINITIONS: &str = include_str!("../../resourceDefinition.json");

/// Pseudo path reported for tables parsed from memory
const INLINE_SOURCE: &str = "<inline>";

/// Errors raised while loading a naming table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("definition file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("resource {name} is defined more than once")]
    DuplicateName { name: String },
}

/// CAF abbreviation block attached to a definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialAbbreviation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Human readable resource family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_provider_namespace: Option<String>,
}

/// Resource definition from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub name: String,
    pub min_length: usize,
    pub max_length: usize,
    /// Pattern a generated name must match (may be wrapped in quotes)
    pub validation_regex: String,
    pub scope: String,
    pub slug: String,
    pub dashes: bool,
    pub lowercase: bool,
    /// Characters matching this pattern are stripped when cleaning a name
    pub regex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<OfficialAbbreviation>,
}

impl ResourceDefinition {
    /// Official CAF slug, or an empty string when the table has none
    pub fn official_slug(&self) -> &str {
        self.official
            .as_ref()
            .and_then(|o| o.slug.as_deref())
            .unwrap_or("")
    }

    /// Validation pattern with the code-generation quotes removed
    pub fn validation_pattern(&self) -> &str {
        strip_quotes(&self.validation_regex)
    }

    /// Cleanup pattern with the code-generation quotes removed
    pub fn cleanup_pattern(&self) -> &str {
        strip_quotes(&self.regex)
    }
}

fn strip_quotes(pattern: &str) -> &str {
    pattern
        .strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .unwrap_or(pattern)
}

/// Loaded naming table, in file order, indexed by resource name
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    definitions: Vec<ResourceDefinition>,
    index: HashMap<String, usize>,
}

impl DefinitionSet {
    /// Build a set, rejecting repeated names
    pub fn from_definitions(definitions: Vec<ResourceDefinition>) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(definitions.len());
        for (position, definition) in definitions.iter().enumerate() {
            if index.insert(definition.name.clone(), position).is_some() {
                return Err(LoadError::DuplicateName {
                    name: definition.name.clone(),
                });
            }
        }
        Ok(Self { definitions, index })
    }

    /// Parse a JSON array of definitions held in memory
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        parse(content, Path::new(INLINE_SOURCE))
    }

    /// Get a resource definition by name
    pub fn get(&self, name: &str) -> Option<&ResourceDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    /// All resource names, in file order
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a DefinitionSet {
    type Item = &'a ResourceDefinition;
    type IntoIter = std::slice::Iter<'a, ResourceDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}

/// Load a naming table from disk
pub fn load(path: impl AsRef<Path>) -> Result<DefinitionSet, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let set = parse(&content, path)?;
    tracing::debug!("Loaded {} definitions from {}", set.len(), path.display());
    Ok(set)
}

fn parse(content: &str, path: &Path) -> Result<DefinitionSet, LoadError> {
    let definitions: Vec<ResourceDefinition> =
        serde_json::from_str(content).map_err(|source| LoadError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
    DefinitionSet::from_definitions(definitions)
}

/// Find a definition by exact (case-sensitive) name
pub fn lookup<'a>(definitions: &'a DefinitionSet, name: &str) -> Option<&'a ResourceDefinition> {
    definitions.get(name)
}

/// Embedded table, parsed once per process
static BUNDLED: OnceLock<DefinitionSet> = OnceLock::new();

/// Get the naming table compiled into the binary
pub fn bundled() -> &'static DefinitionSet {
    BUNDLED.get_or_init(|| {
        DefinitionSet::from_json_str(BUNDLED_DEFINITIONS)
            .unwrap_or_else(|e| panic!("Failed to parse embedded resource definitions: {}", e))
    })
}
