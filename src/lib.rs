//! Validation of Azure resource naming definitions.
//!
//! The naming table maps `azurerm_*` resource types to the abbreviations
//! ("slugs") used in generated names, along with the abbreviation published by
//! the Cloud Adoption Framework. This crate loads the table, spot-checks
//! expected abbreviations and audits the table as a whole.

pub mod audit;
pub mod check;
pub mod config;
pub mod report;
pub mod resource;
