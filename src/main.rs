use anyhow::{Context, Result};
use cafcheck::audit::{check_compliance, find_duplicate_slugs, unique_slug_count};
use cafcheck::check::CheckSuite;
use cafcheck::config::Config;
use cafcheck::report;
use cafcheck::resource::{self, clean_name, lookup, validate_name, DefinitionSet};
use clap::{Parser, Subcommand};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

/// Validate Azure resource naming definitions against CAF abbreviations
#[derive(Parser, Debug)]
#[command(name = "cafcheck", version, about, long_about = None)]
struct Args {
    /// Naming table to validate (defaults to the embedded table)
    #[arg(short, long, global = true)]
    definitions: Option<PathBuf>,

    /// Log verbosity written to the log file (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "off", global = true)]
    log_level: LevelFilter,

    /// Log file (defaults to cafcheck.log in the user config directory)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run slug checks (built-in CAF suite unless a suite file is given)
    Check {
        /// YAML check suite
        #[arg(short, long)]
        suite: Option<PathBuf>,
    },
    /// Show one resource definition
    Show {
        /// Resource type, e.g. azurerm_frontdoor
        name: String,
    },
    /// Report slugs shared by more than one resource
    Duplicates,
    /// Compare slugs against published CAF abbreviations
    Compliance,
    /// Validate a candidate name against a resource's naming rules
    ValidateName {
        /// Resource type, e.g. azurerm_storage_account
        resource: String,
        /// Name to validate
        candidate: String,
    },
    /// Show or update the saved configuration
    Config {
        /// Naming table to use by default
        #[arg(long, value_name = "PATH")]
        default_definitions: Option<PathBuf>,
        /// Check suite to use by default
        #[arg(long, value_name = "FILE")]
        default_suite: Option<PathBuf>,
    },
}

/// Open the log file and install a file-backed subscriber
///
/// Returns the writer guard, which must live until the process exits.
fn setup_logging(
    level: LevelFilter,
    explicit_path: Option<&Path>,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    if level == LevelFilter::OFF {
        return None;
    }

    let log_path = log_path(explicit_path);
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: logging disabled, cannot open {}: {}", log_path.display(), e);
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .init();

    tracing::info!(
        "cafcheck {} logging at {} to {}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_path.display()
    );
    Some(guard)
}

/// Log file location: `--log-file`, else the user config directory
fn log_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|dir| dir.join("cafcheck").join("cafcheck.log"))
        .unwrap_or_else(|| PathBuf::from("cafcheck.log"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_deref());

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

/// Run the selected command; `Ok(false)` means a check or audit failed
fn run(args: &Args) -> Result<bool> {
    let mut config = Config::load();

    if let Command::Config {
        default_definitions,
        default_suite,
    } = &args.command
    {
        return update_config(&mut config, default_definitions.clone(), default_suite.clone());
    }

    let definitions = load_definitions(&config, args)?;

    match &args.command {
        Command::Check { suite } => {
            let suite = match config.effective_suite(suite.as_deref()) {
                Some(path) => CheckSuite::from_yaml_file(&path)
                    .with_context(|| format!("Failed to load check suite {}", path.display()))?,
                None => CheckSuite::caf_builtin(),
            };
            let result = suite.run(&definitions);
            print!("{}", report::render_check_report(&result));
            Ok(result.is_success())
        }
        Command::Show { name } => match lookup(&definitions, name) {
            Some(definition) => {
                print!("{}", report::render_definition(definition));
                Ok(true)
            }
            None => {
                eprintln!("resource {} not found in the definitions", name);
                Ok(false)
            }
        },
        Command::Duplicates => {
            let duplicates = find_duplicate_slugs(&definitions);
            print!(
                "{}",
                report::render_duplicates(
                    definitions.len(),
                    unique_slug_count(&definitions),
                    &duplicates
                )
            );
            Ok(duplicates.is_empty())
        }
        Command::Compliance => {
            let result = check_compliance(&definitions);
            print!("{}", report::render_compliance(&result));
            Ok(result.is_compliant())
        }
        Command::ValidateName {
            resource,
            candidate,
        } => {
            let Some(definition) = lookup(&definitions, resource) else {
                eprintln!("resource {} not found in the definitions", resource);
                return Ok(false);
            };
            let violations = validate_name(definition, candidate)?;
            let suggestion = clean_name(definition, candidate)?;
            print!(
                "{}",
                report::render_name_validation(resource, candidate, &violations, &suggestion)
            );
            Ok(violations.is_empty())
        }
        Command::Config { .. } => Ok(true),
    }
}

fn load_definitions(config: &Config, args: &Args) -> Result<Cow<'static, DefinitionSet>> {
    match config.effective_definitions(args.definitions.as_deref()) {
        Some(path) => {
            tracing::info!("Loading definitions from {}", path.display());
            let set = resource::load(&path)?;
            Ok(Cow::Owned(set))
        }
        None => {
            tracing::info!("Using embedded definitions");
            Ok(Cow::Borrowed(resource::bundled()))
        }
    }
}

fn update_config(
    config: &mut Config,
    definitions: Option<PathBuf>,
    suite: Option<PathBuf>,
) -> Result<bool> {
    let changed = definitions.is_some() || suite.is_some();
    if let Some(path) = definitions {
        config.definitions_path = Some(path);
    }
    if let Some(path) = suite {
        config.suite_path = Some(path);
    }
    if changed {
        config.save().context("Failed to save configuration")?;
    }

    let show = |path: &Option<PathBuf>| {
        path.as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(built-in)".to_string())
    };
    if let Some(path) = Config::config_path() {
        println!("config file: {}", path.display());
    }
    println!("definitions: {}", show(&config.definitions_path));
    println!("suite:       {}", show(&config.suite_path));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parses_into_filter() {
        let args = Args::try_parse_from(["cafcheck", "--log-level", "debug", "duplicates"]).unwrap();
        assert_eq!(args.log_level, LevelFilter::DEBUG);

        let args = Args::try_parse_from(["cafcheck", "duplicates"]).unwrap();
        assert_eq!(args.log_level, LevelFilter::OFF);

        assert!(Args::try_parse_from(["cafcheck", "--log-level", "loud", "duplicates"]).is_err());
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let path = Path::new("/tmp/cafcheck-test.log");
        assert_eq!(log_path(Some(path)), path.to_path_buf());
        assert!(log_path(None).ends_with("cafcheck.log"));
    }

    #[test]
    fn test_global_flags_follow_subcommand() {
        let args = Args::try_parse_from([
            "cafcheck",
            "check",
            "--definitions",
            "table.json",
            "--log-file",
            "run.log",
        ])
        .unwrap();
        assert_eq!(args.definitions, Some(PathBuf::from("table.json")));
        assert_eq!(args.log_file, Some(PathBuf::from("run.log")));
    }
}
