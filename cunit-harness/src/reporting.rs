//! Reporting utilities for test results.

use crate::config::{OutputFormat, TestOptions};
use crate::error::CollectError;
use crate::testcase::ReportLocation;
use crate::util::write_diff;
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

/// Outcome of evaluating a single test item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The assertion passed.
    Passed,
    /// The assertion failed.
    Failed {
        /// Rendered failure report.
        report: String,
        /// Expected value, if reported.
        expected: Option<String>,
        /// Actual value, if reported.
        actual: Option<String>,
    },
    /// The item was filtered out and not evaluated.
    Deselected,
}

/// Result of evaluating a single test item.
#[derive(Clone, Debug)]
pub struct TestItemResult {
    /// Name qualified by source file.
    pub qualified_name: String,
    /// Where the item is reported as living.
    pub location: ReportLocation,
    /// Source line exactly as printed by the test executable.
    pub source_line: u32,
    /// What happened.
    pub outcome: ItemOutcome,
}

impl TestItemResult {
    /// Reports this result in pretty format.
    pub fn report_pretty(&self, options: &TestOptions) -> Result<()> {
        self.write_details(std::io::stderr(), options)
    }

    /// Writes the details of this result to a writer.
    pub fn write_details<W: Write>(&self, mut writer: W, options: &TestOptions) -> Result<()> {
        match &self.outcome {
            ItemOutcome::Deselected => Ok(()),
            ItemOutcome::Passed => {
                if options.verbose {
                    writeln!(
                        writer,
                        "* {}: [{}]... {}",
                        "Test item".bright_yellow(),
                        self.qualified_name.italic(),
                        "ok.".bright_green()
                    )?;
                }
                Ok(())
            }
            ItemOutcome::Failed {
                report,
                expected,
                actual,
            } => {
                writeln!(
                    writer,
                    "* {}: [{}]... {}",
                    "Test item".bright_yellow(),
                    self.qualified_name.italic(),
                    "FAILED.".bright_red()
                )?;

                writeln!(
                    writer,
                    "    {} {}:{}",
                    "at".cyan(),
                    self.location.path.display(),
                    self.source_line
                )?;
                write!(writer, "{}", indent::indent_all_by(4, report))?;

                // Single-line values are already readable in the report.
                if let (Some(expected), Some(actual)) = (expected, actual) {
                    if expected.contains("\\n") || actual.contains("\\n") {
                        let expected = expected.replace("\\n", "\n");
                        let actual = actual.replace("\\n", "\n");

                        writeln!(
                            writer,
                            "    {}",
                            "------ Expected <> Got ---------------------------------".cyan()
                        )?;
                        write_diff(&mut writer, 4, expected.as_str(), actual.as_str())?;
                    }
                }

                Ok(())
            }
        }
    }
}

/// Results from collecting and evaluating one test source file.
#[derive(Debug)]
pub struct TestFileResults {
    /// Path of the test source file.
    pub source_path: PathBuf,
    /// Individual item results.
    pub item_results: Vec<TestItemResult>,
    /// Error that prevented collection, if any.
    pub collection_error: Option<CollectError>,
    /// How long the test executable ran.
    pub duration: std::time::Duration,
    /// Number of passed items.
    pub success_count: u32,
    /// Number of failed items.
    pub fail_count: u32,
    /// Number of deselected items.
    pub deselected_count: u32,
}

impl TestFileResults {
    /// Creates empty results for the given source file.
    pub const fn new(source_path: PathBuf) -> Self {
        Self {
            source_path,
            item_results: vec![],
            collection_error: None,
            duration: std::time::Duration::ZERO,
            success_count: 0,
            fail_count: 0,
            deselected_count: 0,
        }
    }

    /// Records an item result, updating counts.
    pub fn push(&mut self, result: TestItemResult) {
        match result.outcome {
            ItemOutcome::Passed => self.success_count += 1,
            ItemOutcome::Failed { .. } => self.fail_count += 1,
            ItemOutcome::Deselected => self.deselected_count += 1,
        }
        self.item_results.push(result);
    }

    /// Reports these results in pretty format.
    pub fn report_pretty(&self, options: &TestOptions) -> Result<()> {
        self.write_details(std::io::stderr(), options)
    }

    /// Writes the details of these results to a writer.
    pub fn write_details<W: Write>(&self, mut writer: W, options: &TestOptions) -> Result<()> {
        if options.verbose {
            writeln!(
                writer,
                "=================== {}: [{}] ===================",
                "Collected test file".blue(),
                self.source_path.display().to_string().italic(),
            )?;
        }

        if let Some(error) = &self.collection_error {
            write_collection_error(&mut writer, &self.source_path, error)?;
        }

        for item_result in &self.item_results {
            item_result.write_details(&mut writer, options)?;
        }

        if options.verbose {
            writeln!(writer, "    executable ran in {:?}", self.duration)?;
        }

        Ok(())
    }
}

fn write_collection_error<W: Write>(
    writer: &mut W,
    source_path: &std::path::Path,
    error: &CollectError,
) -> Result<()> {
    writeln!(
        writer,
        "* {}: [{}]... {}",
        "Collection error".bright_yellow(),
        source_path.display().to_string().italic(),
        "FAILED.".bright_red()
    )?;
    writeln!(writer, "    {error}")?;

    if let CollectError::ExitStatus { stderr, .. } = error {
        if !stderr.is_empty() {
            writeln!(
                writer,
                "    {}",
                "------ stderr ---------------------------------".cyan()
            )?;
            write!(writer, "{}", indent::indent_all_by(4, stderr))?;
        }
    }

    Ok(())
}

/// Reports test results based on the configured output format.
pub fn report_results(results: &[TestFileResults], options: &TestOptions) -> Result<()> {
    match options.output_format() {
        OutputFormat::Pretty => report_results_pretty(results, options),
        OutputFormat::Junit => report_results_junit(results, options),
        OutputFormat::Terse => Ok(()),
    }
}

fn report_results_pretty(results: &[TestFileResults], options: &TestOptions) -> Result<()> {
    for result in results {
        result.report_pretty(options)?;
    }
    Ok(())
}

fn report_results_junit(results: &[TestFileResults], options: &TestOptions) -> Result<()> {
    let report = build_junit_report(results, options)?;

    report.write_xml(std::io::stdout())?;
    writeln!(std::io::stdout())?;

    Ok(())
}

/// Builds a `JUnit` report with one suite per test source file.
pub fn build_junit_report(
    results: &[TestFileResults],
    options: &TestOptions,
) -> Result<junit_report::Report> {
    let mut report = junit_report::Report::new();

    for result in results {
        let suite_name = result.source_path.display().to_string();
        let mut suite = junit_report::TestSuite::new(suite_name.as_str());

        if let Some(error) = &result.collection_error {
            let mut test_case = junit_report::TestCase::error(
                suite_name.as_str(),
                result.duration.try_into()?,
                "collection error",
                error.to_string().as_str(),
            );

            let mut output_buf: Vec<u8> = vec![];
            write_collection_error(&mut output_buf, &result.source_path, error)?;
            let output_as_string = String::from_utf8(output_buf)?;
            test_case.set_system_out(strip_ansi_escapes::strip_str(output_as_string).as_str());

            suite.add_testcase(test_case);
        }

        for r in &result.item_results {
            let name = r.location.name.as_str();
            let mut test_case = match &r.outcome {
                ItemOutcome::Passed => {
                    junit_report::TestCase::success(name, std::time::Duration::ZERO.try_into()?)
                }
                ItemOutcome::Failed { .. } => junit_report::TestCase::failure(
                    name,
                    std::time::Duration::ZERO.try_into()?,
                    "assertion failure",
                    std::format!("{}:{}", name, r.source_line).as_str(),
                ),
                ItemOutcome::Deselected => junit_report::TestCase::skipped(name),
            };

            let mut output_buf: Vec<u8> = vec![];
            r.write_details(&mut output_buf, options)?;

            let output_as_string = String::from_utf8(output_buf)?;
            if !output_as_string.is_empty() {
                test_case.set_system_out(strip_ansi_escapes::strip_str(output_as_string).as_str());
            }

            suite.add_testcase(test_case);
        }

        report.add_testsuite(suite);
    }

    Ok(report)
}
