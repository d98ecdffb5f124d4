//! Passthrough analysis: buffered tool output in, result document out.
//!
//! The same captured stream feeds both halves: the whole text goes to the
//! report parser, and the non-JSON lines go to the diagnostic extractor.

use crate::diagnostics::{parse_error_buffer, CompilationError};
use crate::report::parse_report;
use crate::transform::{transform_outcomes, GuardOutput};
use tracing::debug;

pub const PARSE_FAILURE_MESSAGE: &str = "Failed to parse test output";
pub const PARSE_FAILURE_NOTE: &str = "No JSON test output detected";

/// Whether a line looks like part of a JSON document.
pub fn is_json_syntax(line: &str) -> bool {
    matches!(
        line.trim_start().chars().next(),
        Some('{' | '}' | '[' | ']' | '"')
    )
}

/// Analyze every captured line of a build-and-test run.
pub fn analyze<S: AsRef<str>>(lines: &[S]) -> GuardOutput {
    let content: String = lines
        .iter()
        .map(|line| format!("{}\n", AsRef::<str>::as_ref(line)))
        .collect();

    let (outcomes, parsed) = match parse_report(&content) {
        Ok(report) => (report.outcomes, true),
        Err(e) => {
            debug!(error = %e, "No test report decoded");
            (Vec::new(), false)
        }
    };

    let diagnostic_lines: Vec<&str> = lines
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|line| !is_json_syntax(line))
        .collect();
    let mut compilation_errors = parse_error_buffer(&diagnostic_lines);

    if !parsed && compilation_errors.is_empty() && !content.is_empty() {
        compilation_errors
            .push(CompilationError::new(PARSE_FAILURE_MESSAGE).with_note(PARSE_FAILURE_NOTE));
    }

    transform_outcomes(&outcomes, &compilation_errors)
}
