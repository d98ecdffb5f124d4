//! The result document read by the TDD Guard hook.
//!
//! Fields are declared in ascending key order so the serialized object keys
//! come out sorted. Optional fields are omitted rather than written as `null`,
//! and an empty `errors` list is omitted entirely.

use crate::report::TestState;
use serde::{Deserialize, Serialize};

/// Aggregate verdict for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reason {
    Passed,
    Failed,
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One error attached to a test result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    /// `file[:line[:column]]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl TestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

/// One test inside a module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<TestError>,
    pub full_name: String,
    pub name: String,
    pub state: TestState,
}

/// Tests sharing a module id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestModule {
    pub module_id: String,
    /// Discovery order, never re-sorted
    pub tests: Vec<TestResult>,
}

/// Canonical output document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<Reason>,
    /// Sorted by `module_id`
    pub test_modules: Vec<TestModule>,
}

impl GuardOutput {
    /// Compact JSON for the results file.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Whether any module holds a failed test.
    pub fn has_failures(&self) -> bool {
        self.test_modules
            .iter()
            .flat_map(|m| m.tests.iter())
            .any(|t| t.state.is_failed())
    }

    /// Number of tests across all modules.
    pub fn test_count(&self) -> usize {
        self.test_modules.iter().map(|m| m.tests.len()).sum()
    }
}
