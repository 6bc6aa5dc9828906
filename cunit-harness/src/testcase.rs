//! Collection nodes: one per test source file, one leaf item per assertion result.

use crate::error::{AssertionFailure, CollectError};
use crate::execution::{RunResult, run_executable};
use crate::protocol::{TestResultRecord, parse};
use std::path::{Path, PathBuf};

/// A native test source file whose compiled executable will be run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestFile {
    source_path: PathBuf,
    executable_path: PathBuf,
}

impl TestFile {
    /// Creates a node for the given source file. The executable is expected
    /// next to it, named the same minus the extension.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let executable_path = source_path.with_extension("");

        Self {
            source_path,
            executable_path,
        }
    }

    /// Path of the test source file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Path of the compiled test executable.
    pub fn executable_path(&self) -> &Path {
        &self.executable_path
    }

    /// Runs the test executable and yields one item per result it reported.
    ///
    /// Every call runs the executable again.
    pub fn collect(&self) -> Result<impl Iterator<Item = TestItem> + '_, CollectError> {
        let (_, items) = self.collect_with_run()?;
        Ok(items)
    }

    /// Like [`TestFile::collect`], but also returns the details of the run.
    pub fn collect_with_run(
        &self,
    ) -> Result<(RunResult, impl Iterator<Item = TestItem> + '_), CollectError> {
        let run = run_executable(&self.executable_path)?;

        let records = parse(&run.stdout).map_err(|source| CollectError::Parse {
            path: self.executable_path.clone(),
            source,
        })?;

        tracing::debug!(
            target: "parse",
            "{}: {} result(s)",
            self.source_path.display(),
            records.len()
        );

        let items = records
            .into_iter()
            .map(move |record| TestItem::new(&self.source_path, record));

        Ok((run, items))
    }
}

/// Where a test item should be reported as living.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportLocation {
    /// Source file path.
    pub path: PathBuf,
    /// 0-based source line.
    pub line: u32,
    /// Item name.
    pub name: String,
}

/// A single assertion result exposed as a test item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestItem {
    source_path: PathBuf,
    record: TestResultRecord,
}

impl TestItem {
    /// Wraps a result record from the given source file.
    pub fn new(source_path: impl Into<PathBuf>, record: TestResultRecord) -> Self {
        Self {
            source_path: source_path.into(),
            record,
        }
    }

    /// Name of the item; the native test function's name.
    pub fn name(&self) -> &str {
        &self.record.function_name
    }

    /// Path of the source file this item was collected from.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// The underlying result record.
    pub const fn record(&self) -> &TestResultRecord {
        &self.record
    }

    /// Name qualified by source file, as used for filtering and listing.
    pub fn qualified_name(&self) -> String {
        std::format!("{}::{}", self.source_path.display(), self.name())
    }

    /// Evaluates the item. The executable already ran; this only inspects the result.
    pub fn run(&self) -> Result<(), AssertionFailure> {
        if self.record.is_failure() {
            Err(AssertionFailure {
                function_name: self.record.function_name.clone(),
                line_number: self.record.line_number,
            })
        } else {
            Ok(())
        }
    }

    /// Renders a human-readable report of a failure returned by [`TestItem::run`].
    pub fn repr_failure(&self, _failure: &AssertionFailure) -> String {
        let record = &self.record;
        std::format!(
            "Test failed : {} at {}:{}\n         got: {}\n    expected: {}\n",
            record.description.as_deref().unwrap_or_default(),
            record.function_name,
            record.line_number,
            record.actual.as_deref().unwrap_or_default(),
            record.expected.as_deref().unwrap_or_default(),
        )
    }

    /// Location to report for this item. Lines are 0-based here while the
    /// protocol's are 1-based.
    pub fn report_info(&self) -> ReportLocation {
        ReportLocation {
            path: self.source_path.clone(),
            line: self.record.line_number.saturating_sub(1),
            name: self.name().to_owned(),
        }
    }
}
