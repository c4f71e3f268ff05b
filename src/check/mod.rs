//! Slug checks
//!
//! - [`assertion`] - Compare one resource's slugs against expected values
//! - [`suite`] - Named lists of checks, built in or loaded from YAML

pub mod assertion;
pub mod suite;

pub use assertion::{assert_official, assert_slug, mismatches, AssertionError};
pub use suite::{
    CheckOutcome, CheckReport, CheckSuite, SlugCheck, SuiteError, APP_CONFIGURATION_RESOURCES,
    AUTOMATION_RESOURCES,
};
