//! Slug assertions against a loaded naming table

use crate::resource::{lookup, DefinitionSet};
use thiserror::Error;

/// A violated slug expectation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionError {
    #[error("resource {name} not found in the definitions")]
    MissingResource { name: String },

    #[error("resource {name}: expected slug {expected:?}, got {actual:?}")]
    SlugMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("resource {name}: expected official slug {expected:?}, got {actual:?}")]
    OfficialMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Every violation for one resource; `None` skips that comparison
pub fn mismatches(
    definitions: &DefinitionSet,
    name: &str,
    expected_slug: Option<&str>,
    expected_official: Option<&str>,
) -> Vec<AssertionError> {
    let Some(definition) = lookup(definitions, name) else {
        return vec![AssertionError::MissingResource {
            name: name.to_string(),
        }];
    };

    let mut errors = Vec::new();

    if let Some(expected) = expected_slug {
        if definition.slug != expected {
            errors.push(AssertionError::SlugMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: definition.slug.clone(),
            });
        }
    }

    if let Some(expected) = expected_official {
        let actual = definition.official_slug();
        if actual != expected {
            errors.push(AssertionError::OfficialMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    errors
}

/// Assert both the slug and the official slug of a resource
pub fn assert_slug(
    definitions: &DefinitionSet,
    name: &str,
    expected_slug: &str,
    expected_official: &str,
) -> Result<(), AssertionError> {
    first_error(mismatches(
        definitions,
        name,
        Some(expected_slug),
        Some(expected_official),
    ))
}

/// Assert only the official slug of a resource
pub fn assert_official(
    definitions: &DefinitionSet,
    name: &str,
    expected_official: &str,
) -> Result<(), AssertionError> {
    first_error(mismatches(definitions, name, None, Some(expected_official)))
}

fn first_error(errors: Vec<AssertionError>) -> Result<(), AssertionError> {
    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
