//! Test runner implementation.

use crate::config::{OutputFormat, RunnerConfig, TestOptions};
use crate::discovery::Discoverer;
use crate::reporting::{ItemOutcome, TestFileResults, TestItemResult};
use crate::testcase::{TestFile, TestItem};
use anyhow::{Context, Result};
use colored::Colorize;

/// Totals across all collected test files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of passed items.
    pub success_count: u32,
    /// Number of failed items.
    pub fail_count: u32,
    /// Number of deselected items.
    pub deselected_count: u32,
    /// Number of files that failed to collect.
    pub collection_error_count: u32,
}

impl RunSummary {
    /// Returns whether the run succeeded: nothing failed and everything collected.
    pub const fn is_success(&self) -> bool {
        self.fail_count == 0 && self.collection_error_count == 0
    }

    fn add(&mut self, results: &TestFileResults) {
        self.success_count += results.success_count;
        self.fail_count += results.fail_count;
        self.deselected_count += results.deselected_count;
        if results.collection_error.is_some() {
            self.collection_error_count += 1;
        }
    }
}

/// The main test runner.
pub struct TestRunner {
    config: RunnerConfig,
    options: TestOptions,
}

impl TestRunner {
    /// Creates a new test runner with the given configuration and options.
    pub const fn new(config: RunnerConfig, options: TestOptions) -> Self {
        Self { config, options }
    }

    /// Finds all test source files under the configured roots, in walk order.
    pub fn discover(&self) -> Result<Vec<TestFile>> {
        let discoverer = self.config.discoverer();
        let mut files = vec![];

        for root in &self.config.roots {
            discover_in(&discoverer, root, &mut files)?;
        }

        Ok(files)
    }

    /// Collects and evaluates every test file, returning per-file results.
    pub fn collect_and_evaluate(&self) -> Result<Vec<TestFileResults>> {
        let files = self.discover()?;
        Ok(files.iter().map(|file| self.run_test_file(file)).collect())
    }

    /// Runs all tests, reports them, and returns success/failure.
    pub fn run(&self) -> Result<bool> {
        if self.options.list_tests_only {
            return self.list();
        }

        let all_results = self.collect_and_evaluate()?;

        let mut summary = RunSummary::default();
        for results in &all_results {
            summary.add(results);
        }

        crate::reporting::report_results(&all_results, &self.options)?;

        if !matches!(self.options.output_format(), OutputFormat::Junit) {
            report_summary(&summary);
        }

        Ok(summary.is_success())
    }

    fn list(&self) -> Result<bool> {
        let mut success = true;

        for file in self.discover()? {
            match file.collect() {
                Ok(items) => {
                    for item in items {
                        let qualified_name = item.qualified_name();
                        if self.options.should_run_test(&qualified_name) {
                            println!("{qualified_name}: test");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("{e}");
                    success = false;
                }
            }
        }

        Ok(success)
    }

    fn run_test_file(&self, file: &TestFile) -> TestFileResults {
        let mut results = TestFileResults::new(file.source_path().to_path_buf());

        match file.collect_with_run() {
            Ok((run, items)) => {
                results.duration = run.duration;
                for item in items {
                    results.push(self.run_test_item(&item));
                }
            }
            Err(e) => {
                tracing::debug!(target: "exec", "collection failed: {e}");
                results.collection_error = Some(e);
            }
        }

        results
    }

    fn run_test_item(&self, item: &TestItem) -> TestItemResult {
        let qualified_name = item.qualified_name();

        let outcome = if !self.options.should_run_test(&qualified_name) {
            ItemOutcome::Deselected
        } else {
            match item.run() {
                Ok(()) => ItemOutcome::Passed,
                Err(failure) => ItemOutcome::Failed {
                    report: item.repr_failure(&failure),
                    expected: item.record().expected.clone(),
                    actual: item.record().actual.clone(),
                },
            }
        };

        TestItemResult {
            qualified_name,
            location: item.report_info(),
            source_line: item.record().line_number,
            outcome,
        }
    }
}

fn discover_in(
    discoverer: &Discoverer,
    root: &std::path::Path,
    files: &mut Vec<TestFile>,
) -> Result<()> {
    let walker = walkdir::WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.with_context(|| format!("searching {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(file) = discoverer.consider(entry.path()) {
            files.push(file);
        }
    }

    Ok(())
}

fn report_summary(summary: &RunSummary) {
    let formatted_fail_count = if summary.fail_count > 0 {
        summary.fail_count.to_string().red()
    } else {
        summary.fail_count.to_string().green()
    };

    let formatted_deselected_count = if summary.deselected_count > 0 {
        summary.deselected_count.to_string().cyan()
    } else {
        summary.deselected_count.to_string().green()
    };

    let formatted_error_count = if summary.collection_error_count > 0 {
        summary.collection_error_count.to_string().red()
    } else {
        summary.collection_error_count.to_string().green()
    };

    eprintln!("================================================================================");
    eprintln!(
        "{} test item(s) ran: {} passed, {} failed, {} deselected; {} collection error(s).",
        summary.success_count + summary.fail_count,
        summary.success_count.to_string().green(),
        formatted_fail_count,
        formatted_deselected_count,
        formatted_error_count,
    );
    eprintln!("================================================================================");
}
