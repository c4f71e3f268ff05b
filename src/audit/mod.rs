//! Table-wide audits of the naming table

mod compliance;
mod duplicates;

pub use compliance::{
    check_compliance, official_abbreviation, ComplianceReport, NonCompliant,
    OFFICIAL_CAF_ABBREVIATIONS,
};
pub use duplicates::{find_duplicate_slugs, unique_slug_count, DuplicateSlug};
