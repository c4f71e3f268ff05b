//! Plain-text rendering of check and audit results

use crate::audit::{ComplianceReport, DuplicateSlug};
use crate::check::CheckReport;
use crate::resource::{NameViolation, ResourceDefinition};
use std::fmt::Write;

/// Non-compliant entries shown before the list is summarized
const MAX_NON_COMPLIANT_SHOWN: usize = 10;
/// Duplicate slugs shown in the compliance summary
const MAX_DUPLICATES_SHOWN: usize = 5;

pub fn render_check_report(report: &CheckReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        if outcome.passed() {
            let detail = outcome
                .check
                .description
                .as_deref()
                .unwrap_or("slugs match");
            let _ = writeln!(out, "PASS {}: {}", outcome.check.resource, detail);
        } else {
            for err in &outcome.errors {
                let _ = writeln!(out, "FAIL {}", err);
            }
        }
    }

    let _ = writeln!(
        out,
        "\nsuite {}: {} passed, {} failed",
        report.suite,
        report.passed(),
        report.failed()
    );
    out
}

pub fn render_definition(definition: &ResourceDefinition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "name:             {}", definition.name);
    let _ = writeln!(out, "slug:             {}", definition.slug);
    let _ = writeln!(out, "official slug:    {}", definition.official_slug());
    if let Some(official) = &definition.official {
        if let Some(resource) = &official.resource {
            let _ = writeln!(out, "official name:    {}", resource);
        }
        if let Some(namespace) = &official.resource_provider_namespace {
            let _ = writeln!(out, "provider:         {}", namespace);
        }
    }
    let _ = writeln!(out, "scope:            {}", definition.scope);
    let _ = writeln!(
        out,
        "length:           {}..={}",
        definition.min_length, definition.max_length
    );
    let _ = writeln!(out, "dashes:           {}", definition.dashes);
    let _ = writeln!(out, "lowercase:        {}", definition.lowercase);
    let _ = writeln!(out, "validation regex: {}", definition.validation_pattern());
    let _ = writeln!(out, "cleanup regex:    {}", definition.cleanup_pattern());
    out
}

pub fn render_duplicates(total: usize, unique: usize, duplicates: &[DuplicateSlug]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total resources: {}", total);
    let _ = writeln!(out, "unique slugs:    {}", unique);
    let _ = writeln!(out, "duplicate slugs: {}", duplicates.len());

    if duplicates.is_empty() {
        let _ = writeln!(out, "\nno duplicates found");
        return out;
    }

    for duplicate in duplicates {
        let _ = writeln!(
            out,
            "\nslug {:?} used by {} resources:",
            duplicate.slug,
            duplicate.count()
        );
        for resource in &duplicate.resources {
            let _ = writeln!(out, "  - {}", resource);
        }
    }
    out
}

pub fn render_compliance(report: &ComplianceReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "compliant resources:     {}", report.compliant);
    let _ = writeln!(out, "non-compliant resources: {}", report.non_compliant.len());
    let _ = writeln!(out, "duplicate slugs:         {}", report.duplicates.len());
    let _ = writeln!(out, "unique slugs:            {}", report.unique_slugs);
    let _ = writeln!(out, "total resources:         {}", report.total_resources);

    if !report.non_compliant.is_empty() {
        let _ = writeln!(out, "\nnon-compliant resources:");
        for item in report.non_compliant.iter().take(MAX_NON_COMPLIANT_SHOWN) {
            let _ = writeln!(
                out,
                "  - {}: {:?} should be {:?}",
                item.resource, item.actual, item.expected
            );
        }
        if report.non_compliant.len() > MAX_NON_COMPLIANT_SHOWN {
            let _ = writeln!(
                out,
                "  ... and {} more",
                report.non_compliant.len() - MAX_NON_COMPLIANT_SHOWN
            );
        }
    }

    if !report.duplicates.is_empty() {
        let _ = writeln!(out, "\nduplicate slugs:");
        for duplicate in report.duplicates.iter().take(MAX_DUPLICATES_SHOWN) {
            let _ = writeln!(
                out,
                "  - {:?} used {} times",
                duplicate.slug,
                duplicate.count()
            );
        }
        if report.duplicates.len() > MAX_DUPLICATES_SHOWN {
            let _ = writeln!(
                out,
                "  ... and {} more duplicates",
                report.duplicates.len() - MAX_DUPLICATES_SHOWN
            );
        }
    }

    if report.is_compliant() {
        let _ = writeln!(out, "\nall resources follow CAF abbreviations");
    }
    out
}

pub fn render_name_validation(
    resource: &str,
    candidate: &str,
    violations: &[NameViolation],
    suggestion: &str,
) -> String {
    let mut out = String::new();
    if violations.is_empty() {
        let _ = writeln!(out, "{:?} is a valid {} name", candidate, resource);
        return out;
    }

    let _ = writeln!(out, "{:?} is not a valid {} name:", candidate, resource);
    for violation in violations {
        let _ = writeln!(out, "  - {}", violation);
    }
    if !suggestion.is_empty() && suggestion != candidate {
        let _ = writeln!(out, "suggested: {}", suggestion);
    }
    out
}
