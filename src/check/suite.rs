//! Check suites
//!
//! A suite is a named list of slug expectations. The CAF suite is built in;
//! others can be read from YAML:
//!
//! ```yaml
//! name: network
//! checks:
//!   - resource: azurerm_virtual_network
//!     slug: vnet
//!     official: vnet
//!     description: Virtual network should use 'vnet'
//! ```

use super::assertion::{mismatches, AssertionError};
use crate::resource::DefinitionSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("failed to read suite {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse suite {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("check for {resource} has neither a slug nor an official expectation")]
    EmptyExpectation { resource: String },
}

/// One expectation about a resource definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugCheck {
    pub resource: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SlugCheck {
    /// Expect both the slug and the official slug
    pub fn slug(resource: &str, slug: &str, official: &str, description: &str) -> Self {
        Self {
            resource: resource.to_string(),
            slug: Some(slug.to_string()),
            official: Some(official.to_string()),
            description: Some(description.to_string()),
        }
    }

    /// Expect only the official slug
    pub fn official(resource: &str, official: &str) -> Self {
        Self {
            resource: resource.to_string(),
            slug: None,
            official: Some(official.to_string()),
            description: None,
        }
    }

    pub fn evaluate(&self, definitions: &DefinitionSet) -> CheckOutcome {
        CheckOutcome {
            check: self.clone(),
            errors: mismatches(
                definitions,
                &self.resource,
                self.slug.as_deref(),
                self.official.as_deref(),
            ),
        }
    }
}

/// Result of evaluating one check
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub check: SlugCheck,
    pub errors: Vec<AssertionError>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcomes of a suite run, in check order
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub suite: String,
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssertionError> {
        self.outcomes.iter().flat_map(|o| o.errors.iter())
    }
}

/// Resources sharing the Azure Automation account abbreviation
pub const AUTOMATION_RESOURCES: &[&str] = &[
    "azurerm_automation_account",
    "azurerm_automation_certificate",
    "azurerm_automation_connection_type",
    "azurerm_automation_credential",
    "azurerm_automation_hybrid_runbook_worker",
    "azurerm_automation_hybrid_runbook_worker_group",
    "azurerm_automation_module",
    "azurerm_automation_runbook",
    "azurerm_automation_schedule",
    "azurerm_automation_source_control",
    "azurerm_automation_software_update_configuration",
    "azurerm_automation_variable_bool",
    "azurerm_automation_variable_datetime",
    "azurerm_automation_variable_int",
    "azurerm_automation_variable_object",
    "azurerm_automation_variable_string",
    "azurerm_automation_watcher",
    "azurerm_automation_webhook",
];

/// Resources sharing the App Configuration store abbreviation
pub const APP_CONFIGURATION_RESOURCES: &[&str] = &[
    "azurerm_app_configuration_feature",
    "azurerm_app_configuration_key",
];

/// Named list of checks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSuite {
    pub name: String,
    pub checks: Vec<SlugCheck>,
}

impl CheckSuite {
    /// Spot checks for resources that must follow CAF abbreviations
    pub fn caf_builtin() -> Self {
        let mut checks = vec![
            SlugCheck::slug(
                "azurerm_frontdoor",
                "afd",
                "afd",
                "Front Door (classic) should use CAF abbreviation 'afd'",
            ),
            SlugCheck::slug(
                "azurerm_automation_account",
                "aa",
                "aa",
                "Azure Automation Account should use CAF abbreviation 'aa'",
            ),
            SlugCheck::slug(
                "azurerm_automation_connection_type",
                "aacontype",
                "aa",
                "Azure Automation Connection Type official should be 'aa'",
            ),
            SlugCheck::slug(
                "azurerm_automation_hybrid_runbook_worker",
                "aahrbwkr",
                "aa",
                "Azure Automation Hybrid Runbook Worker official should be 'aa'",
            ),
            SlugCheck::slug(
                "azurerm_app_configuration_feature",
                "acfeat",
                "appcs",
                "App Configuration Feature official should be 'appcs'",
            ),
            SlugCheck::slug(
                "azurerm_app_configuration_key",
                "ackey",
                "appcs",
                "App Configuration Key official should be 'appcs'",
            ),
        ];

        checks.extend(
            AUTOMATION_RESOURCES
                .iter()
                .map(|name| SlugCheck::official(name, "aa")),
        );
        checks.extend(
            APP_CONFIGURATION_RESOURCES
                .iter()
                .map(|name| SlugCheck::official(name, "appcs")),
        );

        Self {
            name: "caf".to_string(),
            checks,
        }
    }

    pub fn from_yaml_str(content: &str, path: &Path) -> Result<Self, SuiteError> {
        let suite: CheckSuite =
            serde_yaml::from_str(content).map_err(|source| SuiteError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(check) = suite
            .checks
            .iter()
            .find(|c| c.slug.is_none() && c.official.is_none())
        {
            return Err(SuiteError::EmptyExpectation {
                resource: check.resource.clone(),
            });
        }

        Ok(suite)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SuiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Resource names referenced by the suite, without repeats
    pub fn resources(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for check in &self.checks {
            if !names.contains(&check.resource.as_str()) {
                names.push(&check.resource);
            }
        }
        names
    }

    /// Evaluate every check; a failing check never stops the rest
    pub fn run(&self, definitions: &DefinitionSet) -> CheckReport {
        let outcomes: Vec<CheckOutcome> = self
            .checks
            .iter()
            .map(|check| {
                let outcome = check.evaluate(definitions);
                if outcome.passed() {
                    tracing::debug!("check passed: {}", check.resource);
                } else {
                    for err in &outcome.errors {
                        tracing::warn!("check failed: {}", err);
                    }
                }
                outcome
            })
            .collect();

        let report = CheckReport {
            suite: self.name.clone(),
            outcomes,
        };
        tracing::info!(
            "Suite {}: {} passed, {} failed",
            report.suite,
            report.passed(),
            report.failed()
        );
        report
    }
}
