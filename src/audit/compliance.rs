//! CAF compliance audit
//!
//! Compares slugs against the abbreviations published in the Cloud Adoption
//! Framework resource abbreviation guidance.

use super::duplicates::{find_duplicate_slugs, unique_slug_count, DuplicateSlug};
use crate::resource::DefinitionSet;

/// Published CAF abbreviations for primary resource types
pub const OFFICIAL_CAF_ABBREVIATIONS: &[(&str, &str)] = &[
    ("azurerm_api_management", "apim"),
    ("azurerm_app_configuration", "appcs"),
    ("azurerm_application_gateway", "agw"),
    ("azurerm_application_insights", "appi"),
    ("azurerm_automation_account", "aa"),
    ("azurerm_availability_set", "avail"),
    ("azurerm_bastion_host", "bas"),
    ("azurerm_container_registry", "cr"),
    ("azurerm_cosmosdb_account", "cosmos"),
    ("azurerm_data_factory", "adf"),
    ("azurerm_databricks_workspace", "dbw"),
    ("azurerm_firewall", "afw"),
    ("azurerm_frontdoor", "afd"),
    ("azurerm_function_app", "func"),
    ("azurerm_key_vault", "kv"),
    ("azurerm_kubernetes_cluster", "aks"),
    // external load balancer is the default for a generic LB
    ("azurerm_lb", "lbe"),
    ("azurerm_log_analytics_workspace", "log"),
    ("azurerm_logic_app_workflow", "logic"),
    ("azurerm_managed_disk", "disk"),
    ("azurerm_mysql_server", "mysql"),
    ("azurerm_mssql_server", "sql"),
    ("azurerm_network_interface", "nic"),
    ("azurerm_network_security_group", "nsg"),
    ("azurerm_postgresql_server", "psql"),
    ("azurerm_public_ip", "pip"),
    ("azurerm_redis_cache", "redis"),
    ("azurerm_resource_group", "rg"),
    ("azurerm_storage_account", "st"),
    ("azurerm_subnet", "snet"),
    ("azurerm_virtual_machine", "vm"),
    ("azurerm_virtual_network", "vnet"),
    ("azurerm_virtual_network_gateway", "vgw"),
];

/// Published abbreviation for a resource type, if CAF defines one
pub fn official_abbreviation(name: &str) -> Option<&'static str> {
    OFFICIAL_CAF_ABBREVIATIONS
        .iter()
        .find(|(resource, _)| *resource == name)
        .map(|(_, slug)| *slug)
}

/// A definition whose slug differs from the CAF abbreviation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonCompliant {
    pub resource: String,
    pub actual: String,
    pub expected: String,
}

#[derive(Debug, Clone, Default)]
pub struct ComplianceReport {
    pub total_resources: usize,
    pub unique_slugs: usize,
    pub compliant: usize,
    pub non_compliant: Vec<NonCompliant>,
    pub duplicates: Vec<DuplicateSlug>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.non_compliant.is_empty() && self.duplicates.is_empty()
    }
}

/// Audit every definition that has a published CAF abbreviation
pub fn check_compliance(definitions: &DefinitionSet) -> ComplianceReport {
    let mut report = ComplianceReport {
        total_resources: definitions.len(),
        unique_slugs: unique_slug_count(definitions),
        ..Default::default()
    };

    for definition in definitions {
        let Some(expected) = official_abbreviation(&definition.name) else {
            continue;
        };

        if definition.slug == expected {
            report.compliant += 1;
        } else {
            tracing::debug!(
                "{} uses slug {:?}, CAF expects {:?}",
                definition.name,
                definition.slug,
                expected
            );
            report.non_compliant.push(NonCompliant {
                resource: definition.name.clone(),
                actual: definition.slug.clone(),
                expected: expected.to_string(),
            });
        }
    }

    report.duplicates = find_duplicate_slugs(definitions);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_has_no_repeated_resources() {
        let mut names: Vec<&str> = OFFICIAL_CAF_ABBREVIATIONS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OFFICIAL_CAF_ABBREVIATIONS.len());
    }

    #[test]
    fn test_official_abbreviation_lookup() {
        assert_eq!(official_abbreviation("azurerm_key_vault"), Some("kv"));
        assert_eq!(official_abbreviation("azurerm_key_vault_secret"), None);
    }

    #[test]
    fn test_non_compliant_slug_is_reported() {
        let set = DefinitionSet::from_json_str(
            r#"[
                {
                    "name": "azurerm_key_vault", "min_length": 3, "max_length": 24,
                    "validation_regex": "^[a-zA-Z][a-zA-Z0-9-]{1,22}[a-zA-Z0-9]$",
                    "scope": "global", "slug": "vault", "dashes": true,
                    "lowercase": false, "regex": "[^0-9A-Za-z-]"
                },
                {
                    "name": "azurerm_subnet", "min_length": 1, "max_length": 80,
                    "validation_regex": "^[a-zA-Z0-9_.-]{1,80}$",
                    "scope": "parent", "slug": "snet", "dashes": true,
                    "lowercase": false, "regex": "[^0-9A-Za-z_.-]"
                },
                {
                    "name": "azurerm_key_vault_secret", "min_length": 1, "max_length": 127,
                    "validation_regex": "^[a-zA-Z0-9-]{1,127}$",
                    "scope": "parent", "slug": "kvs", "dashes": true,
                    "lowercase": false, "regex": "[^0-9A-Za-z-]"
                }
            ]"#,
        )
        .unwrap();

        let report = check_compliance(&set);
        assert_eq!(report.total_resources, 3);
        assert_eq!(report.compliant, 1);
        assert_eq!(
            report.non_compliant,
            vec![NonCompliant {
                resource: "azurerm_key_vault".to_string(),
                actual: "vault".to_string(),
                expected: "kv".to_string(),
            }]
        );
        assert!(!report.is_compliant());
    }
}
