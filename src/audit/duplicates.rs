//! Duplicate slug detection

use crate::resource::DefinitionSet;
use std::collections::HashMap;

/// A slug shared by more than one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSlug {
    pub slug: String,
    /// Resource names using the slug, in file order
    pub resources: Vec<String>,
}

impl DuplicateSlug {
    pub fn count(&self) -> usize {
        self.resources.len()
    }
}

/// Slugs used by more than one definition, most used first
///
/// Definitions with an empty slug are ignored.
pub fn find_duplicate_slugs(definitions: &DefinitionSet) -> Vec<DuplicateSlug> {
    let mut by_slug: HashMap<&str, Vec<String>> = HashMap::new();
    for definition in definitions {
        if definition.slug.is_empty() {
            continue;
        }
        by_slug
            .entry(definition.slug.as_str())
            .or_default()
            .push(definition.name.clone());
    }

    let mut duplicates: Vec<DuplicateSlug> = by_slug
        .into_iter()
        .filter(|(_, resources)| resources.len() > 1)
        .map(|(slug, resources)| DuplicateSlug {
            slug: slug.to_string(),
            resources,
        })
        .collect();

    duplicates.sort_by(|a, b| b.count().cmp(&a.count()).then_with(|| a.slug.cmp(&b.slug)));

    if !duplicates.is_empty() {
        tracing::warn!("{} duplicate slug(s) found", duplicates.len());
    }
    duplicates
}

/// Number of distinct non-empty slugs
pub fn unique_slug_count(definitions: &DefinitionSet) -> usize {
    let mut slugs: Vec<&str> = definitions
        .iter()
        .map(|d| d.slug.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    slugs.sort_unstable();
    slugs.dedup();
    slugs.len()
}
