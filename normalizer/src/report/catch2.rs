//! Catch2 `--reporter json` decoding
//!
//! Each test case carries a `test-info` name, a list of `runs` whose `path`
//! is a tree of `section` and `assertion` nodes, and `totals.assertions`
//! counters that decide the state.
//!
//! Section names are collected one tree level at a time from the first run.
//! Every section at a level contributes its name, but only the last section
//! carrying a `path` decides which level is walked next, so sibling sections
//! that both nest further yield a single name chain.

use super::json::{bool_field, int_field, object_field, str_field};
use super::outcome::{TestOutcome, TestState};
use crate::error::ReportError;
use serde_json::Value;
use tracing::debug;

const SECTION_KIND: &str = "section";
const ASSERTION_KIND: &str = "assertion";

pub(crate) fn decode(data: &Value) -> Result<Vec<TestOutcome>, ReportError> {
    let test_run = object_field(data, "test-run")
        .ok_or(ReportError::MissingField { field: "test-run" })?;
    let cases = test_run
        .get("test-cases")
        .and_then(Value::as_array)
        .ok_or(ReportError::MissingField {
            field: "test-cases",
        })?;

    let mut outcomes = Vec::new();
    for case in cases.iter().filter(|c| c.is_object()) {
        if let Some(outcome) = decode_case(case)? {
            outcomes.push(outcome);
        }
    }

    Ok(outcomes)
}

/// Decode one test case; `None` when its first run is not an object.
fn decode_case(case: &Value) -> Result<Option<TestOutcome>, ReportError> {
    let case_name = match object_field(case, "test-info") {
        Some(info) => str_field(info, "name")?,
        None => "",
    };

    let runs = case
        .get("runs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let sections = match runs.first() {
        Some(run) if !run.is_object() => return Ok(None),
        Some(run) => section_chain(run)?,
        None => Vec::new(),
    };

    let (name, full_name) = match (sections.first(), sections.last()) {
        (Some(first), Some(last)) => {
            let joined = sections.join("/");
            let full_name = if !case_name.is_empty() && *first != case_name {
                format!("{}/{}", case_name, joined)
            } else {
                joined
            };
            (last.to_string(), full_name)
        }
        _ => (case_name.to_string(), case_name.to_string()),
    };

    let state = state_from_totals(case)?;
    let mut outcome = TestOutcome::new(name, full_name, state);
    if state.is_failed() {
        outcome.failure_messages = failed_expressions(runs)?;
    }

    Ok(Some(outcome))
}

/// Section names reachable from a run, level by level.
fn section_chain(run: &Value) -> Result<Vec<&str>, ReportError> {
    let mut names = Vec::new();
    let mut level = run.get("path");

    while let Some(Value::Array(nodes)) = level {
        let mut next = None;
        for node in nodes.iter().filter(|n| n.is_object()) {
            if str_field(node, "kind")? != SECTION_KIND {
                continue;
            }
            names.push(str_field(node, "name")?);
            if let Some(children) = node.get("path") {
                next = Some(children);
            }
        }
        level = next;
    }

    Ok(names)
}

fn state_from_totals(case: &Value) -> Result<TestState, ReportError> {
    let Some(assertions) =
        object_field(case, "totals").and_then(|totals| object_field(totals, "assertions"))
    else {
        return Ok(TestState::Unknown);
    };

    let failed = int_field(assertions, "failed")?;
    let skipped = int_field(assertions, "skipped")?;
    let passed = int_field(assertions, "passed")?;

    let state = if skipped > 0 && failed == 0 && passed == 0 {
        TestState::Skipped
    } else if failed > 0 {
        TestState::Failed
    } else {
        TestState::Passed
    };
    Ok(state)
}

/// Expanded expressions of failed assertions across every run, depth-first
/// in document order.
///
/// Top-level path items are read strictly. Nested nodes with mistyped fields
/// are skipped so one bad assertion cannot sink the whole report.
fn failed_expressions(runs: &[Value]) -> Result<Vec<String>, ReportError> {
    let mut messages = Vec::new();

    for run in runs.iter().filter(|r| r.is_object()) {
        let Some(path) = run.get("path").and_then(Value::as_array) else {
            continue;
        };

        let mut stack: Vec<(&Value, bool)> = path.iter().rev().map(|n| (n, false)).collect();
        while let Some((node, nested)) = stack.pop() {
            if !node.is_object() {
                continue;
            }
            let expression = match failed_expression(node) {
                Ok(expression) => expression,
                Err(e) if nested => {
                    debug!(error = %e, "Skipping malformed nested Catch2 node");
                    None
                }
                Err(e) => return Err(e),
            };
            if let Some(expanded) = expression {
                messages.push(expanded.to_string());
            }
            if let Some(children) = node.get("path").and_then(Value::as_array) {
                stack.extend(children.iter().rev().map(|n| (n, true)));
            }
        }
    }

    Ok(messages)
}

/// Non-empty expansion of a failed assertion node.
fn failed_expression(node: &Value) -> Result<Option<&str>, ReportError> {
    if str_field(node, "kind")? != ASSERTION_KIND || bool_field(node, "status", true)? {
        return Ok(None);
    }
    let Some(expression) = object_field(node, "expression") else {
        return Ok(None);
    };
    let expanded = str_field(expression, "expanded")?;
    Ok((!expanded.is_empty()).then_some(expanded))
}
