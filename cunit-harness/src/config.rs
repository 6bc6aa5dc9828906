//! Configuration types for the test runner.

use crate::discovery::{DEFAULT_SOURCE_EXTENSION, DEFAULT_TEST_PREFIX, Discoverer};
use std::path::PathBuf;

/// Configuration for the test runner.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Files and directories to search for test sources.
    pub roots: Vec<PathBuf>,
    /// Extension of native test sources.
    pub source_extension: String,
    /// Required file stem prefix of native test sources.
    pub test_prefix: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}

impl RunnerConfig {
    /// Creates a new runner config searching the given roots with default naming rules.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            source_extension: DEFAULT_SOURCE_EXTENSION.into(),
            test_prefix: DEFAULT_TEST_PREFIX.into(),
        }
    }

    /// Sets the native test source extension.
    #[must_use]
    pub fn with_source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    /// Sets the test file stem prefix.
    #[must_use]
    pub fn with_test_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.test_prefix = prefix.into();
        self
    }

    /// Creates the discoverer described by this config.
    pub fn discoverer(&self) -> Discoverer {
        Discoverer::new(self.source_extension.as_str(), self.test_prefix.as_str())
    }
}

/// Output format for test results.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// `JUnit` XML format.
    Junit,
    /// Summary only.
    Terse,
}

/// Options controlling which items run and how results are reported.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct TestOptions {
    /// Output format for test results.
    #[clap(long = "format")]
    pub format: Option<OutputFormat>,

    /// Display details regarding successful test items.
    #[clap(short = 'v', long = "verbose", env = "CUNIT_VERBOSE")]
    pub verbose: bool,

    /// List collected test items without evaluating them.
    #[clap(long = "list")]
    pub list_tests_only: bool,

    /// Exactly match filters (not just substring match).
    #[clap(long = "exact")]
    pub exact_match: bool,

    /// Patterns for test items to be included.
    #[clap(short = 'k', long = "filter")]
    pub include_filters: Vec<String>,

    /// Patterns for test items to be excluded.
    #[clap(long = "skip")]
    pub exclude_filters: Vec<String>,
}

impl TestOptions {
    /// Returns the output format, defaulting to [`OutputFormat::Pretty`].
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Returns whether a test item should run based on include/exclude filters.
    pub fn should_run_test(&self, qualified_name: &str) -> bool {
        if self.include_filters.is_empty() && self.exclude_filters.is_empty() {
            return true;
        }

        // If any include filters were given, then we are in opt-in mode.
        if !self.include_filters.is_empty()
            && !self.test_matches_filters(qualified_name, &self.include_filters)
        {
            return false;
        }

        // In all cases, exclude filters may be used to exclude tests.
        if !self.exclude_filters.is_empty()
            && self.test_matches_filters(qualified_name, &self.exclude_filters)
        {
            return false;
        }

        true
    }

    fn test_matches_filters(&self, qualified_test_name: &str, filters: &[String]) -> bool {
        if self.exact_match {
            filters.iter().any(|f| f == qualified_test_name)
        } else {
            filters
                .iter()
                .any(|filter| qualified_test_name.contains(filter))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(include: &[&str], exclude: &[&str], exact: bool) -> TestOptions {
        TestOptions {
            include_filters: include.iter().map(|s| (*s).to_owned()).collect(),
            exclude_filters: exclude.iter().map(|s| (*s).to_owned()).collect(),
            exact_match: exact,
            ..TestOptions::default()
        }
    }

    #[test]
    fn test_no_filters_runs_everything() {
        assert!(options(&[], &[], false).should_run_test("t/test_a.c::add"));
    }

    #[test]
    fn test_include_filters() {
        let opts = options(&["add"], &[], false);
        assert!(opts.should_run_test("t/test_a.c::add"));
        assert!(!opts.should_run_test("t/test_a.c::sub"));
    }

    #[test]
    fn test_exclude_filters() {
        let opts = options(&[], &["test_a.c"], false);
        assert!(!opts.should_run_test("t/test_a.c::add"));
        assert!(opts.should_run_test("t/test_b.c::add"));

        let opts = options(&["add"], &["test_a.c"], false);
        assert!(!opts.should_run_test("t/test_a.c::add"));
        assert!(opts.should_run_test("t/test_b.c::add"));
    }

    #[test]
    fn test_exact_filters() {
        let opts = options(&["t/test_a.c::add"], &[], true);
        assert!(opts.should_run_test("t/test_a.c::add"));
        assert!(!opts.should_run_test("t/test_a.c::add_more"));
    }

    #[test]
    fn test_config_builders() {
        let config = RunnerConfig::default()
            .with_source_extension("cc")
            .with_test_prefix("check");
        let discoverer = config.discoverer();
        assert_eq!(discoverer.extension(), "cc");
        assert_eq!(discoverer.prefix(), "check");
        assert_eq!(config.roots, vec![PathBuf::from(".")]);
    }
}
