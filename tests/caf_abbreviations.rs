//! Integration tests for the shipped naming table
//!
//! These tests load `resourceDefinition.json` from the repository root and
//! verify the abbreviations that must follow the Cloud Adoption Framework.

use cafcheck::audit::{check_compliance, find_duplicate_slugs};
use cafcheck::check::{
    assert_official, assert_slug, AssertionError, CheckSuite, APP_CONFIGURATION_RESOURCES,
    AUTOMATION_RESOURCES,
};
use cafcheck::resource::{self, lookup, DefinitionSet, LoadError};
use std::path::PathBuf;
use std::sync::OnceLock;

fn definitions_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resourceDefinition.json")
}

/// Shared table, read once for the whole test binary
fn definitions() -> &'static DefinitionSet {
    static DEFINITIONS: OnceLock<DefinitionSet> = OnceLock::new();
    DEFINITIONS.get_or_init(|| {
        resource::load(definitions_path()).expect("resourceDefinition.json should load")
    })
}

mod abbreviations {
    use super::*;

    #[test]
    fn test_frontdoor_uses_afd() {
        assert_eq!(assert_slug(definitions(), "azurerm_frontdoor", "afd", "afd"), Ok(()));
    }

    #[test]
    fn test_automation_account_uses_aa() {
        assert_eq!(
            assert_slug(definitions(), "azurerm_automation_account", "aa", "aa"),
            Ok(())
        );
    }

    #[test]
    fn test_automation_connection_type_official_is_aa() {
        assert_eq!(
            assert_slug(
                definitions(),
                "azurerm_automation_connection_type",
                "aacontype",
                "aa"
            ),
            Ok(())
        );
    }

    #[test]
    fn test_automation_hybrid_runbook_worker_official_is_aa() {
        assert_eq!(
            assert_slug(
                definitions(),
                "azurerm_automation_hybrid_runbook_worker",
                "aahrbwkr",
                "aa"
            ),
            Ok(())
        );
    }

    #[test]
    fn test_app_configuration_children_use_appcs() {
        assert_eq!(
            assert_slug(
                definitions(),
                "azurerm_app_configuration_feature",
                "acfeat",
                "appcs"
            ),
            Ok(())
        );
        assert_eq!(
            assert_slug(definitions(), "azurerm_app_configuration_key", "ackey", "appcs"),
            Ok(())
        );
    }

    #[test]
    fn test_every_automation_resource_has_official_aa() {
        for name in AUTOMATION_RESOURCES {
            assert_eq!(assert_official(definitions(), name, "aa"), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_every_app_configuration_resource_has_official_appcs() {
        for name in APP_CONFIGURATION_RESOURCES {
            assert_eq!(assert_official(definitions(), name, "appcs"), Ok(()), "{}", name);
        }
    }

    #[test]
    fn test_every_checked_resource_exists() {
        let suite = CheckSuite::caf_builtin();
        for name in suite.resources() {
            assert!(lookup(definitions(), name).is_some(), "{} should exist", name);
        }
    }

    #[test]
    fn test_builtin_suite_passes() {
        let report = CheckSuite::caf_builtin().run(definitions());
        let failures: Vec<&AssertionError> = report.failures().collect();
        assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    }

    #[test]
    fn test_wrong_expectation_is_reported() {
        assert_eq!(
            assert_slug(definitions(), "azurerm_frontdoor", "fd", "afd"),
            Err(AssertionError::SlugMismatch {
                name: "azurerm_frontdoor".to_string(),
                expected: "fd".to_string(),
                actual: "afd".to_string(),
            })
        );
    }
}

mod table {
    use super::*;

    #[test]
    fn test_file_matches_embedded_table() {
        let bundled = resource::bundled();
        assert_eq!(bundled.len(), definitions().len());
        for definition in definitions() {
            assert_eq!(bundled.get(&definition.name), Some(definition));
        }
    }

    #[test]
    fn test_no_duplicate_slugs() {
        assert!(find_duplicate_slugs(definitions()).is_empty());
    }

    #[test]
    fn test_table_is_caf_compliant() {
        let report = check_compliance(definitions());
        assert!(report.compliant > 0);
        assert!(report.is_compliant(), "{:?}", report.non_compliant);
    }

    #[test]
    fn test_length_bounds_are_ordered() {
        for definition in definitions() {
            assert!(
                definition.min_length <= definition.max_length,
                "{} has min_length > max_length",
                definition.name
            );
        }
    }

    #[test]
    fn test_every_pattern_compiles() {
        for definition in definitions() {
            assert!(
                resource::validate_name(definition, &definition.slug).is_ok(),
                "{} has an invalid validation pattern",
                definition.name
            );
            assert!(
                resource::clean_name(definition, &definition.slug).is_ok(),
                "{} has an invalid cleanup pattern",
                definition.name
            );
        }
    }
}

mod load_errors {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceDefinition.json");

        match resource::load(&path) {
            Err(LoadError::NotFound { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceDefinition.json");
        std::fs::write(&path, "[{\"name\": \"azurerm_frontdoor\",").unwrap();

        assert!(matches!(
            resource::load(&path),
            Err(LoadError::ParseError { .. })
        ));
    }

    #[test]
    fn test_object_instead_of_array_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceDefinition.json");
        std::fs::write(&path, "{\"resources\": []}").unwrap();

        assert!(matches!(
            resource::load(&path),
            Err(LoadError::ParseError { .. })
        ));
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            resource::load(dir.path()),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn test_empty_array_loads_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resourceDefinition.json");
        std::fs::write(&path, "[]").unwrap();

        let set = resource::load(&path).unwrap();
        assert!(set.is_empty());
        assert_eq!(
            assert_slug(&set, "azurerm_frontdoor", "afd", "afd"),
            Err(AssertionError::MissingResource {
                name: "azurerm_frontdoor".to_string()
            })
        );
    }

    #[test]
    fn test_suite_file_runs_against_loaded_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network.yaml");
        std::fs::write(
            &path,
            "name: network\nchecks:\n  - resource: azurerm_virtual_network\n    slug: vnet\n    official: vnet\n  - resource: azurerm_subnet\n    slug: subnet\n",
        )
        .unwrap();

        let suite = CheckSuite::from_yaml_file(&path).unwrap();
        let report = suite.run(definitions());
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
    }
}
