//! Resource definition layer
//!
//! This module provides the data-driven naming table for Azure resources.
//! Each definition carries the naming rules and abbreviations for one
//! `azurerm_*` resource type, so new types are added by editing JSON only.
//!
//! # Architecture
//!
//! - [`registry`] - Loads resource definitions from disk or the embedded table
//! - [`naming`] - Applies a definition's rules to candidate names
//!
//! # Example
//!
//! ```no_run
//! use cafcheck::resource::{load, lookup};
//!
//! let definitions = load("resourceDefinition.json")?;
//! let frontdoor = lookup(&definitions, "azurerm_frontdoor").unwrap();
//! assert_eq!(frontdoor.slug, "afd");
//! # Ok::<(), cafcheck::resource::LoadError>(())
//! ```

pub mod naming;
mod registry;

pub use naming::{clean_name, validate_name, NameViolation, NamingError};
pub use registry::*;
