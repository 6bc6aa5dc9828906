//! Error types for collecting and evaluating native test results.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Malformed protocol data in a test executable's output.
///
/// Each variant carries the 1-based line of the captured output on which
/// the problem was found.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A detail line (`TST`, `EXP`, `GOT`) appeared before any result line.
    #[error("output line {line}: [{token}] appears before any [PASS] or [FAIL] line")]
    OrphanDetail {
        /// Output line number.
        line: usize,
        /// The detail token that was found.
        token: String,
    },

    /// A result line carried no `<function>:<line>` data.
    #[error("output line {line}: [{token}] is missing its location")]
    MissingLocation {
        /// Output line number.
        line: usize,
        /// The result token that was found.
        token: String,
    },

    /// A known token was not followed by a space before its data.
    #[error("output line {line}: expected a space after [{token}] in '{text}'")]
    GluedToken {
        /// Output line number.
        line: usize,
        /// The token that was found.
        token: String,
        /// The whole line as found.
        text: String,
    },

    /// A result line's location had no `:` separator.
    #[error("output line {line}: expected <function>:<line>, found '{data}'")]
    MissingSeparator {
        /// Output line number.
        line: usize,
        /// The location text as found.
        data: String,
    },

    /// A result line's source line number was not an integer.
    #[error("output line {line}: invalid source line number '{value}'")]
    InvalidLineNumber {
        /// Output line number.
        line: usize,
        /// The text that failed to parse.
        value: String,
        /// Underlying integer parse error.
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Failure to collect results from a test executable.
#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    /// The executable could not be started.
    #[error("failed to run {}: {source}", path.display())]
    Spawn {
        /// Path of the executable.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The executable ran but did not exit cleanly.
    #[error("{} exited with {status}", path.display())]
    ExitStatus {
        /// Path of the executable.
        path: PathBuf,
        /// The exit status observed.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// The executable's output could not be parsed.
    #[error("failed to parse output of {}: {source}", path.display())]
    Parse {
        /// Path of the executable.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ParseError,
    },
}

/// A single failed assertion reported by a test executable.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[error("{function_name}:{line_number} failed")]
pub struct AssertionFailure {
    /// Native test function containing the assertion.
    pub function_name: String,
    /// 1-based source line of the assertion.
    pub line_number: u32,
}
