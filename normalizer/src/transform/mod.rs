//! Result Transformer
//!
//! Merges compilation errors and test outcomes into the grouped, sorted
//! [`GuardOutput`] document. A build failure becomes a synthetic
//! `compilation` module with a single `build` test carrying every error.

pub mod output;

pub use output::{GuardOutput, Reason, TestError, TestModule, TestResult};

use crate::diagnostics::CompilationError;
use crate::report::{extract_module, extract_simple_name, TestOutcome, TestState};
use std::collections::BTreeMap;
use tracing::debug;

/// Module id reserved for the synthetic build test
pub const COMPILATION_MODULE: &str = "compilation";
/// Name of the synthetic build test
pub const BUILD_TEST_NAME: &str = "build";
/// Full name of the synthetic build test
pub const BUILD_TEST_FULL_NAME: &str = "compilation::build";

impl From<&CompilationError> for TestError {
    fn from(error: &CompilationError) -> Self {
        Self {
            message: error.message.clone(),
            location: error.location(),
            code: error.code.clone(),
            help: error.help.clone(),
            note: error.note.clone(),
            expected: None,
            actual: None,
        }
    }
}

impl From<&TestOutcome> for TestResult {
    fn from(outcome: &TestOutcome) -> Self {
        // Only failed tests carry errors, and only when there is text to show.
        let errors = match outcome.state {
            TestState::Failed => outcome
                .error_message()
                .map(TestError::new)
                .into_iter()
                .collect(),
            TestState::Passed | TestState::Skipped | TestState::Unknown => Vec::new(),
        };

        Self {
            errors,
            full_name: outcome.full_name.clone(),
            name: extract_simple_name(&outcome.full_name).to_string(),
            state: outcome.state,
        }
    }
}

/// Build the result document from test outcomes and compilation errors.
pub fn transform_outcomes(
    outcomes: &[TestOutcome],
    compilation_errors: &[CompilationError],
) -> GuardOutput {
    // BTreeMap keeps module ids in ordinal byte order.
    let mut modules: BTreeMap<String, TestModule> = BTreeMap::new();
    let mut has_failure = false;

    if !compilation_errors.is_empty() {
        module_entry(&mut modules, COMPILATION_MODULE)
            .tests
            .push(TestResult {
                errors: compilation_errors.iter().map(TestError::from).collect(),
                full_name: BUILD_TEST_FULL_NAME.to_string(),
                name: BUILD_TEST_NAME.to_string(),
                state: TestState::Failed,
            });
        has_failure = true;
    }

    for outcome in outcomes {
        has_failure |= outcome.state.is_failed();
        module_entry(&mut modules, extract_module(&outcome.full_name))
            .tests
            .push(TestResult::from(outcome));
    }

    let reason = if has_failure {
        Reason::Failed
    } else {
        Reason::Passed
    };
    debug!(
        modules = modules.len(),
        outcomes = outcomes.len(),
        compilation_errors = compilation_errors.len(),
        %reason,
        "Transformed results"
    );

    GuardOutput {
        reason: Some(reason),
        test_modules: modules.into_values().collect(),
    }
}

fn module_entry<'a>(
    modules: &'a mut BTreeMap<String, TestModule>,
    id: &str,
) -> &'a mut TestModule {
    modules
        .entry(id.to_string())
        .or_insert_with(|| TestModule {
            module_id: id.to_string(),
            tests: Vec::new(),
        })
}
