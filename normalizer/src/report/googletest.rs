//! GoogleTest `--gtest_output=json` decoding
//!
//! Shape: `{"testsuites": [{"name": ..., "testsuite": [{"name", "status", "failures": [...]}]}]}`

use super::json::str_field;
use super::outcome::{TestOutcome, TestState};
use crate::error::ReportError;
use serde_json::Value;

/// Status GoogleTest writes for disabled / filtered-out tests
const NOT_RUN_STATUS: &str = "NOTRUN";

pub(crate) fn decode(data: &Value) -> Result<Vec<TestOutcome>, ReportError> {
    let suites = data
        .get("testsuites")
        .and_then(Value::as_array)
        .ok_or(ReportError::MissingField {
            field: "testsuites",
        })?;

    let mut outcomes = Vec::new();
    for suite in suites.iter().filter(|s| s.is_object()) {
        let Some(cases) = suite.get("testsuite").and_then(Value::as_array) else {
            continue;
        };
        let suite_name = str_field(suite, "name")?;

        for case in cases.iter().filter(|c| c.is_object()) {
            outcomes.push(decode_case(suite_name, case)?);
        }
    }

    Ok(outcomes)
}

fn decode_case(suite_name: &str, case: &Value) -> Result<TestOutcome, ReportError> {
    let name = str_field(case, "name")?;
    let full_name = if suite_name.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", suite_name, name)
    };

    let failures = case
        .get("failures")
        .and_then(Value::as_array)
        .filter(|f| !f.is_empty());

    let outcome = if str_field(case, "status")? == NOT_RUN_STATUS {
        TestOutcome::new(name, full_name, TestState::Skipped)
    } else if let Some(failures) = failures {
        // Entries that are not objects or lack a string message are dropped.
        let messages = failures
            .iter()
            .filter_map(|f| f.get("message").and_then(Value::as_str))
            .map(String::from)
            .collect();
        TestOutcome::new(name, full_name, TestState::Failed).with_failure_messages(messages)
    } else {
        TestOutcome::new(name, full_name, TestState::Passed)
    };

    Ok(outcome)
}
