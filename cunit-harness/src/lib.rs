//! Collects and reports results from precompiled native unit-test executables.
//!
//! A native test source such as `tests/test_math.c` is expected to have been
//! compiled to `tests/test_math` beforehand. Collecting the source runs that
//! executable and parses the result lines it prints on stdout:
//!
//! ```text
//! [PASS] test_add:10
//! [FAIL] test_sub:20
//! [TST] checks subtraction
//! [EXP] 5
//! [GOT] 4
//! ```
//!
//! Each `[PASS]`/`[FAIL]` line becomes one [`TestItem`]. The [`TestRunner`]
//! drives discovery, collection and reporting over a set of directories.

mod config;
mod discovery;
mod error;
mod execution;
pub mod protocol;
mod reporting;
mod runner;
mod testcase;
pub mod util;

pub use config::{OutputFormat, RunnerConfig, TestOptions};
pub use discovery::{DEFAULT_SOURCE_EXTENSION, DEFAULT_TEST_PREFIX, Discoverer};
pub use error::{AssertionFailure, CollectError, ParseError};
pub use execution::{RunResult, run_executable};
pub use reporting::{
    ItemOutcome, TestFileResults, TestItemResult, build_junit_report, report_results,
};
pub use runner::{RunSummary, TestRunner};
pub use testcase::{ReportLocation, TestFile, TestItem};
