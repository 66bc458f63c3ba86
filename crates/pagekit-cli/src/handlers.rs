//! Command handlers. Each returns the text to print on stdout.

use crate::commands::{ConfigAction, ConfigFormat, SelectorArgs, UrlArgs};
use crate::error::{CliError, CliResult};
use pagekit::{compose_url, RunnerConfig, SelectorSpec};
use std::path::Path;

/// Run a `config` subcommand
pub fn run_config(action: &ConfigAction) -> CliResult<String> {
    match action {
        ConfigAction::Show { file, format } => show_config(file.as_deref(), *format),
        ConfigAction::Validate { file } => validate_config(file),
    }
}

fn show_config(file: Option<&Path>, format: ConfigFormat) -> CliResult<String> {
    let config = match file {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    let rendered = match format {
        ConfigFormat::Yaml => config.to_yaml()?,
        ConfigFormat::Json => config.to_json()?,
    };
    Ok(rendered)
}

fn validate_config(file: &Path) -> CliResult<String> {
    let config = RunnerConfig::load(file)?;
    tracing::debug!(
        address = %config.driver_address,
        browser = %config.capabilities.browser_name,
        "config is valid"
    );
    Ok(format!("{}: ok", file.display()))
}

/// Run the `selector` command
pub fn run_selector(args: &SelectorArgs) -> CliResult<String> {
    if args.name.is_empty() {
        return Err(CliError::invalid_argument("selector name must not be empty"));
    }
    let spec = SelectorSpec::load(&args.file)?;
    if spec.lookup(&args.name).is_none() {
        tracing::warn!(
            name = %args.name,
            file = %args.file.display(),
            "name is not registered; resolving to the base only"
        );
    }
    Ok(spec.resolve(Some(&args.name), !args.no_base))
}

/// Run the `url` command
pub fn run_url(args: &UrlArgs) -> CliResult<String> {
    if args.base.is_empty() {
        return Err(CliError::invalid_argument("base URL must not be empty"));
    }
    Ok(compose_url(&args.base, &args.append))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_show_defaults_as_yaml() {
            let out = run_config(&ConfigAction::Show {
                file: None,
                format: ConfigFormat::Yaml,
            })
            .unwrap();
            assert!(out.contains("framework: mocha"));
        }

        #[test]
        fn test_show_file_as_json() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "runner.yaml", "default_wait_ms: 750\n");
            let out = run_config(&ConfigAction::Show {
                file: Some(path),
                format: ConfigFormat::Json,
            })
            .unwrap();
            assert!(out.contains("\"default_wait_ms\": 750"));
        }

        #[test]
        fn test_validate_reports_ok() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "runner.yaml", "slow_ms: 100\n");
            let out = run_config(&ConfigAction::Validate { file: path }).unwrap();
            assert!(out.ends_with(": ok"));
        }

        #[test]
        fn test_validate_rejects_zero_window() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "runner.yaml", "window:\n  width: 0\n  height: 768\n");
            let err = run_config(&ConfigAction::Validate { file: path }).unwrap_err();
            assert!(matches!(err, CliError::Page(_)));
        }

        #[test]
        fn test_validate_missing_file() {
            let err = run_config(&ConfigAction::Validate {
                file: PathBuf::from("/nonexistent/runner.yaml"),
            })
            .unwrap_err();
            assert!(matches!(err, CliError::Page(_)));
        }
    }

    mod selector_tests {
        use super::*;

        const SPEC: &str = "base: '#results'\nselectors:\n  row: tr.result\n";

        fn args(dir: &TempDir, name: &str, no_base: bool) -> SelectorArgs {
            SelectorArgs {
                file: write(dir, "results.yaml", SPEC),
                name: name.to_string(),
                no_base,
            }
        }

        #[test]
        fn test_resolve_with_base() {
            let dir = TempDir::new().unwrap();
            assert_eq!(run_selector(&args(&dir, "row", false)).unwrap(), "#results tr.result");
        }

        #[test]
        fn test_resolve_without_base() {
            let dir = TempDir::new().unwrap();
            assert_eq!(run_selector(&args(&dir, "row", true)).unwrap(), "tr.result");
        }

        #[test]
        fn test_unknown_name_keeps_separator() {
            let dir = TempDir::new().unwrap();
            assert_eq!(run_selector(&args(&dir, "nope", false)).unwrap(), "#results ");
        }

        #[test]
        fn test_duplicate_name_in_file_rejected() {
            let dir = TempDir::new().unwrap();
            let args = SelectorArgs {
                file: write(&dir, "dup.yaml", "selectors:\n  row: tr\n  row: li\n"),
                name: "row".to_string(),
                no_base: false,
            };
            let err = run_selector(&args).unwrap_err();
            assert!(matches!(err, CliError::Page(pagekit::PageError::Config { .. })));
        }

        #[test]
        fn test_empty_name_rejected() {
            let dir = TempDir::new().unwrap();
            let err = run_selector(&args(&dir, "", false)).unwrap_err();
            assert!(matches!(err, CliError::InvalidArgument { .. }));
        }
    }

    mod url_tests {
        use super::*;

        #[test]
        fn test_url_append() {
            let args = UrlArgs {
                base: "http://x/y?b=2".to_string(),
                append: "a=1".to_string(),
            };
            assert_eq!(run_url(&args).unwrap(), "http://x/y?b=2&a=1");
        }

        #[test]
        fn test_url_empty_base() {
            let args = UrlArgs {
                base: String::new(),
                append: "a=1".to_string(),
            };
            assert!(run_url(&args).is_err());
        }
    }
}
