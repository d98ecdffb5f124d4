//! Structured Test Report Module
//!
//! Decodes the JSON written by C++ test frameworks into a flat list of
//! [`TestOutcome`]s. The report may be surrounded by arbitrary log text; the
//! framework is sniffed from marker keys in the raw text before any decoding
//! so a malformed payload is still classified.
//!
//! | Framework  | Marker key(s)                  | Layout                         |
//! |------------|--------------------------------|--------------------------------|
//! | GoogleTest | `"testsuites"`                 | suites → flat test arrays      |
//! | Catch2     | `"test-run"` / `"test-cases"`  | cases → runs → section tree    |

mod catch2;
mod googletest;
pub mod json;
pub mod outcome;

pub use json::extract_json;
pub use outcome::{extract_module, extract_simple_name, TestOutcome, TestState, DEFAULT_MODULE};

use crate::error::ReportError;
use serde_json::Value;
use tracing::debug;

/// Test framework that produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    GoogleTest,
    Catch2,
    Unknown,
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoogleTest => write!(f, "googletest"),
            Self::Catch2 => write!(f, "catch2"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

fn is_googletest(json: &str) -> bool {
    json.contains("\"testsuites\"")
}

fn is_catch2(json: &str) -> bool {
    json.contains("\"test-run\"") || json.contains("\"test-cases\"")
}

/// Classify a report by its marker keys. GoogleTest wins if both appear.
pub fn detect_framework(json: &str) -> Framework {
    if is_googletest(json) {
        Framework::GoogleTest
    } else if is_catch2(json) {
        Framework::Catch2
    } else {
        Framework::Unknown
    }
}

/// Outcomes decoded from one report
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub framework: Framework,
    /// One entry per leaf test case, in report order
    pub outcomes: Vec<TestOutcome>,
}

/// Find, classify and decode the JSON test report embedded in `content`.
pub fn parse_report(content: &str) -> Result<ParsedReport, ReportError> {
    let json = extract_json(content).ok_or(ReportError::NoJsonFound)?;

    let framework = detect_framework(json);
    let outcomes = match framework {
        Framework::GoogleTest => googletest::decode(&serde_json::from_str::<Value>(json)?)?,
        Framework::Catch2 => catch2::decode(&serde_json::from_str::<Value>(json)?)?,
        Framework::Unknown => return Err(ReportError::UnknownFramework),
    };

    debug!(%framework, outcomes = outcomes.len(), "Decoded test report");
    Ok(ParsedReport {
        framework,
        outcomes,
    })
}
