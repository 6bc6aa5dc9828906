//! Parser for the line-oriented result protocol printed by native test executables.
//!
//! Each protocol line starts with a bracketed token:
//!
//! ```text
//! [PASS] <function_name>:<line_number>
//! [FAIL] <function_name>:<line_number>
//! [TST] <description of the most recent result>
//! [EXP] <expected value of the most recent result>
//! [GOT] <actual value of the most recent result>
//! ```
//!
//! Lines that don't start with `[` are noise and are skipped, as are lines
//! with tokens this parser doesn't know. A known token must be followed by a
//! space; `[FAIL]sub:21` is an error rather than noise.

use crate::error::ParseError;

/// Outcome of a single assertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Condition {
    /// The assertion held.
    Pass,
    /// The assertion did not hold.
    Fail,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "PASS"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// One parsed assertion outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestResultRecord {
    /// Whether the assertion passed.
    pub condition: Condition,
    /// Name of the native test function containing the assertion.
    pub function_name: String,
    /// 1-based source line of the assertion.
    pub line_number: u32,
    /// Free-text description of the assertion (`TST`).
    pub description: Option<String>,
    /// Expected value (`EXP`).
    pub expected: Option<String>,
    /// Actual value (`GOT`).
    pub actual: Option<String>,
}

impl TestResultRecord {
    /// Creates a record with no detail fields.
    pub fn new(condition: Condition, function_name: impl Into<String>, line_number: u32) -> Self {
        Self {
            condition,
            function_name: function_name.into(),
            line_number,
            description: None,
            expected: None,
            actual: None,
        }
    }

    /// Returns whether this record reports a failed assertion.
    pub fn is_failure(&self) -> bool {
        self.condition == Condition::Fail
    }
}

enum Token<'a> {
    Result(Condition),
    Detail(Detail),
    Unknown(&'a str),
}

#[derive(Clone, Copy, Debug)]
enum Detail {
    Description,
    Expected,
    Actual,
}

impl Detail {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Description => "TST",
            Self::Expected => "EXP",
            Self::Actual => "GOT",
        }
    }
}

impl<'a> Token<'a> {
    fn classify(token: &'a str) -> Self {
        match token {
            "PASS" => Self::Result(Condition::Pass),
            "FAIL" => Self::Result(Condition::Fail),
            "TST" => Self::Detail(Detail::Description),
            "EXP" => Self::Detail(Detail::Expected),
            "GOT" => Self::Detail(Detail::Actual),
            other => Self::Unknown(other),
        }
    }
}

/// Collects records in emission order and tracks which one detail lines attach to.
#[derive(Default)]
struct RecordAccumulator {
    records: Vec<TestResultRecord>,
}

impl RecordAccumulator {
    fn push(&mut self, record: TestResultRecord) {
        self.records.push(record);
    }

    fn attach(&mut self, line: usize, detail: Detail, data: &str) -> Result<(), ParseError> {
        let Some(target) = self.records.last_mut() else {
            return Err(ParseError::OrphanDetail {
                line,
                token: detail.as_str().to_owned(),
            });
        };

        if !target.is_failure() {
            tracing::debug!(
                target: "parse",
                "ignoring [{}] on line {line}; {} passed",
                detail.as_str(),
                target.function_name
            );
            return Ok(());
        }

        let value = Some(data.to_owned());
        match detail {
            Detail::Description => target.description = value,
            Detail::Expected => target.expected = value,
            Detail::Actual => target.actual = value,
        }

        Ok(())
    }

    fn finish(self) -> Vec<TestResultRecord> {
        self.records
    }
}

/// Parses the captured standard output of a native test executable.
///
/// Records are returned in the order their `[PASS]`/`[FAIL]` lines appeared.
pub fn parse(raw: &str) -> Result<Vec<TestResultRecord>, ParseError> {
    let mut acc = RecordAccumulator::default();

    for (idx, line) in raw.split('\n').enumerate() {
        let line_no = idx + 1;
        let line = line.trim();

        if !line.starts_with('[') {
            continue;
        }

        let (bracketed, data) = line
            .split_once(' ')
            .map_or((line, None), |(t, d)| (t, Some(d)));

        let Some(token) = bracketed
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
        else {
            if let Some(token) = glued_known_token(bracketed) {
                return Err(ParseError::GluedToken {
                    line: line_no,
                    token: token.to_owned(),
                    text: line.to_owned(),
                });
            }

            tracing::trace!(target: "parse", "skipping malformed token on line {line_no}: {bracketed}");
            continue;
        };

        match Token::classify(token) {
            Token::Result(condition) => {
                acc.push(parse_result_line(line_no, condition, token, data)?);
            }
            Token::Detail(detail) => acc.attach(line_no, detail, data.unwrap_or_default())?,
            Token::Unknown(other) => {
                tracing::trace!(target: "parse", "skipping unknown token on line {line_no}: [{other}]");
            }
        }
    }

    Ok(acc.finish())
}

/// Returns the token of text like `[FAIL]sub:21` where a known token runs into its data.
fn glued_known_token(text: &str) -> Option<&str> {
    let (token, _) = text.strip_prefix('[')?.split_once(']')?;
    match Token::classify(token) {
        Token::Unknown(_) => None,
        Token::Result(_) | Token::Detail(_) => Some(token),
    }
}

fn parse_result_line(
    line: usize,
    condition: Condition,
    token: &str,
    data: Option<&str>,
) -> Result<TestResultRecord, ParseError> {
    let data = data.ok_or_else(|| ParseError::MissingLocation {
        line,
        token: token.to_owned(),
    })?;

    let (function_name, line_number) =
        data.split_once(':').ok_or_else(|| ParseError::MissingSeparator {
            line,
            data: data.to_owned(),
        })?;

    let line_number = line_number
        .trim()
        .parse::<u32>()
        .map_err(|source| ParseError::InvalidLineNumber {
            line,
            value: line_number.to_owned(),
            source,
        })?;

    Ok(TestResultRecord::new(condition, function_name, line_number))
}
