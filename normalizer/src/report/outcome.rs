//! Framework-agnostic test outcomes and name helpers

use serde::{Deserialize, Serialize};

/// Module used when a full name carries no `.` or `/` delimiter
pub const DEFAULT_MODULE: &str = "tests";

/// Final state of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
    Skipped,
    /// Report did not carry enough information to decide
    Unknown,
}

impl TestState {
    /// Lowercase label used in the result document
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl std::fmt::Display for TestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One leaf test case discovered in a report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    /// Leaf identifier
    pub name: String,
    /// Hierarchical identifier, `.`- or `/`-delimited
    pub full_name: String,
    pub state: TestState,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    /// Failure text in report order (empty unless failed)
    pub failure_messages: Vec<String>,
}

impl TestOutcome {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>, state: TestState) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            state,
            stdout: None,
            stderr: None,
            failure_messages: Vec::new(),
        }
    }

    pub fn with_failure_messages(mut self, messages: Vec<String>) -> Self {
        self.failure_messages = messages;
        self
    }

    /// Captured stdout, stderr and failure messages joined by newlines.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn error_message(&self) -> Option<String> {
        let parts = self
            .stdout
            .iter()
            .chain(self.stderr.iter())
            .chain(self.failure_messages.iter());

        let mut message = String::new();
        for part in parts {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(part);
        }

        (!message.is_empty()).then_some(message)
    }
}

/// Grouping key: text before the first `.`, else before the first `/`.
pub fn extract_module(full_name: &str) -> &str {
    full_name
        .find('.')
        .or_else(|| full_name.find('/'))
        .map(|pos| &full_name[..pos])
        .unwrap_or(DEFAULT_MODULE)
}

/// Leaf name: text after the last `.`, else after the last `/`.
pub fn extract_simple_name(full_name: &str) -> &str {
    full_name
        .rfind('.')
        .or_else(|| full_name.rfind('/'))
        .map(|pos| &full_name[pos + 1..])
        .unwrap_or(full_name)
}
