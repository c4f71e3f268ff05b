//! Naming rules
//!
//! Applies a definition's length bounds, casing/dash flags and validation
//! pattern to candidate names.

use super::registry::ResourceDefinition;
use regex::Regex;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NamingError {
    #[error("resource {name} has an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A single rule a candidate name breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameViolation {
    TooShort { min: usize, actual: usize },
    TooLong { max: usize, actual: usize },
    NotLowercase,
    DashesNotAllowed,
    PatternMismatch { pattern: String },
}

impl fmt::Display for NameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameViolation::TooShort { min, actual } => {
                write!(f, "name is {} characters, minimum is {}", actual, min)
            }
            NameViolation::TooLong { max, actual } => {
                write!(f, "name is {} characters, maximum is {}", actual, max)
            }
            NameViolation::NotLowercase => write!(f, "name must be lowercase"),
            NameViolation::DashesNotAllowed => write!(f, "name must not contain dashes"),
            NameViolation::PatternMismatch { pattern } => {
                write!(f, "name does not match {}", pattern)
            }
        }
    }
}

fn compile(definition: &ResourceDefinition, pattern: &str) -> Result<Regex, NamingError> {
    Regex::new(pattern).map_err(|source| NamingError::InvalidPattern {
        name: definition.name.clone(),
        pattern: pattern.to_string(),
        source,
    })
}

/// Check a candidate against every rule of the definition
pub fn validate_name(
    definition: &ResourceDefinition,
    candidate: &str,
) -> Result<Vec<NameViolation>, NamingError> {
    let pattern = definition.validation_pattern();
    let validation = compile(definition, pattern)?;

    let mut violations = Vec::new();
    let length = candidate.chars().count();

    if length < definition.min_length {
        violations.push(NameViolation::TooShort {
            min: definition.min_length,
            actual: length,
        });
    }
    if length > definition.max_length {
        violations.push(NameViolation::TooLong {
            max: definition.max_length,
            actual: length,
        });
    }
    if definition.lowercase && candidate.chars().any(char::is_uppercase) {
        violations.push(NameViolation::NotLowercase);
    }
    if !definition.dashes && candidate.contains('-') {
        violations.push(NameViolation::DashesNotAllowed);
    }
    if !validation.is_match(candidate) {
        violations.push(NameViolation::PatternMismatch {
            pattern: pattern.to_string(),
        });
    }

    tracing::trace!(
        "Validated {:?} against {}: {} violation(s)",
        candidate,
        definition.name,
        violations.len()
    );
    Ok(violations)
}

/// Fold case, strip disallowed characters and apply dash and length rules
///
/// Case is folded before the cleanup pattern runs, so uppercase letters in a
/// raw name survive as lowercase for definitions that require it.
pub fn clean_name(definition: &ResourceDefinition, raw: &str) -> Result<String, NamingError> {
    let cleanup = compile(definition, definition.cleanup_pattern())?;

    let folded = if definition.lowercase {
        raw.to_lowercase()
    } else {
        raw.to_string()
    };
    let mut name = cleanup.replace_all(&folded, "").into_owned();
    if !definition.dashes {
        name.retain(|c| c != '-');
    }
    if name.chars().count() > definition.max_length {
        name = name.chars().take(definition.max_length).collect();
    }

    Ok(name)
}
