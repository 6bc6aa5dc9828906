//! Configuration file support.
//!
//! Settings are layered: built-in defaults < config file < command-line arguments.
//! Unknown fields in the TOML file are ignored.

use cunit_harness::{OutputFormat, RunnerConfig, TestOptions};
use etcetera::BaseStrategy;
use std::path::{Path, PathBuf};

use crate::args::CommandLineArgs;

/// Name of the config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE_NAME: &str = "cunit.toml";

/// Root configuration structure.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Test source discovery options.
    pub discovery: DiscoveryConfig,

    /// Result reporting options.
    pub report: ReportConfig,
}

/// Test source discovery options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Extension of native test sources.
    pub extension: Option<String>,

    /// Required file stem prefix of native test sources.
    pub prefix: Option<String>,
}

/// Result reporting options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format.
    pub format: Option<OutputFormat>,

    /// Report passing items too.
    pub verbose: Option<bool>,
}

impl Config {
    /// Builds runner configuration and options, merging with CLI arguments.
    ///
    /// Settings are applied with the following priority (highest to lowest):
    /// 1. CLI arguments (if explicitly set)
    /// 2. Config file values
    /// 3. Default values
    pub fn to_runner_settings(&self, args: &CommandLineArgs) -> (RunnerConfig, TestOptions) {
        let roots = if args.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            args.paths.clone()
        };

        let mut runner_config = RunnerConfig::new(roots);
        if let Some(extension) = args
            .extension
            .as_ref()
            .or(self.discovery.extension.as_ref())
        {
            runner_config = runner_config.with_source_extension(extension.as_str());
        }
        if let Some(prefix) = args.prefix.as_ref().or(self.discovery.prefix.as_ref()) {
            runner_config = runner_config.with_test_prefix(prefix.as_str());
        }

        let mut options = args.test_options.clone();
        options.format = options.format.or(self.report.format);
        options.verbose = merge_bool_setting(options.verbose, false, self.report.verbose);

        (runner_config, options)
    }
}

/// Merges a boolean setting from CLI args, config file, and defaults.
///
/// A CLI flag that differs from its default was explicitly provided; otherwise
/// the config value wins if present.
const fn merge_bool_setting(
    cli_value: bool,
    cli_default: bool,
    config_value: Option<bool>,
) -> bool {
    if cli_value != cli_default {
        cli_value
    } else if let Some(config) = config_value {
        config
    } else {
        cli_default
    }
}

/// Result of attempting to load a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration, or default if loading failed.
    pub config: Config,

    /// The path that was used (or attempted) for loading.
    pub path: Option<PathBuf>,

    /// Any error that occurred during loading.
    pub error: Option<ConfigLoadError>,

    /// Whether the path was explicitly provided by the user (via `--config`).
    /// If true and there's an error, the run should fail rather than continue.
    pub explicit_path: bool,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the TOML content.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Returns the per-user configuration file path for the current platform.
///
/// Returns `None` if the platform's config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("cunit").join("config.toml"))
}

/// Loads configuration from the specified path.
pub fn load_from_path(path: &Path) -> ConfigLoadResult {
    let config = std::fs::read_to_string(path)
        .map_err(ConfigLoadError::from)
        .and_then(|content| toml::from_str::<Config>(&content).map_err(ConfigLoadError::from));

    let (config, error) = match config {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    ConfigLoadResult {
        config,
        path: Some(path.to_path_buf()),
        error,
        explicit_path: false,
    }
}

/// Loads configuration based on the provided options.
///
/// # Arguments
///
/// * `disabled` - If true, skip loading and return defaults
/// * `explicit_path` - If provided, use this path instead of searching
///
/// Without an explicit path, `cunit.toml` in the current directory is used if
/// present, then the per-user config file. Missing files there are not errors.
pub fn load_config(disabled: bool, explicit_path: Option<&Path>) -> ConfigLoadResult {
    let defaults = |path| ConfigLoadResult {
        config: Config::default(),
        path,
        error: None,
        explicit_path: false,
    };

    if disabled {
        return defaults(None);
    }

    if let Some(path) = explicit_path {
        let mut result = load_from_path(path);
        result.explicit_path = true;
        return result;
    }

    let local_path = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
    if local_path.is_file() {
        return load_from_path(&local_path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        path => defaults(path),
    }
}
