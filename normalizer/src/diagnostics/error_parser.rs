//! Compiler diagnostic extraction
//!
//! Recovers structured errors from raw GCC/Clang/MSVC stderr text. Lines are
//! ANSI-stripped, boilerplate context is dropped, and diagnostic patterns are
//! tried most-specific first. `note:` lines attach to the error that precedes
//! them.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// GCC/Clang with full location: `file.cpp:10:5: error: message` (also `fatal error:`)
static GCC_ERROR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):([0-9]+):([0-9]+):\s*(?:fatal\s+)?error:\s*(.+)").unwrap()
});

/// GCC/Clang without column: `file.cpp:10: error: message`
static GCC_ERROR_NO_COLUMN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):([0-9]+):\s*(?:fatal\s+)?error:\s*(.+)").unwrap()
});

/// MSVC: `file.cpp(10): error C2065: message`
static MSVC_ERROR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\(([0-9]+)\):\s*error\s+C([0-9]+):\s*(.+)").unwrap()
});

/// Location-less: `error: message` (linker driver output and friends)
static SIMPLE_ERROR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^error:\s*(.+)").unwrap());

static NOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*note:\s*(.+)").unwrap());

/// CSI-introduced SGR sequences (colors, bold, reset)
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());

/// Substrings marking compiler context chains that carry no error of their own.
const BOILERPLATE_MARKERS: &[&str] = &[
    "In file included from",
    "In instantiation of",
    "required from",
];

const ERROR_INDICATORS: &[&str] = &["error:", "fatal error:"];

/// Message used when error indicators exist but no line had a known shape.
pub const FALLBACK_MESSAGE: &str = "Compilation failed";

/// One compile error recovered from compiler output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationError {
    /// Toolchain-specific code (e.g., "C2065")
    pub code: Option<String>,
    /// Source file the diagnostic points at
    pub file: Option<String>,
    /// 1-based line number
    pub line: Option<u32>,
    /// 1-based column number
    pub column: Option<u32>,
    /// Diagnostic message
    pub message: String,
    pub help: Option<String>,
    /// Accumulated `note:` lines, newline-joined
    pub note: Option<String>,
}

impl CompilationError {
    /// Create an error carrying only a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Attach a note to the error
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// `file[:line[:column]]`, or `None` when no file is known
    pub fn location(&self) -> Option<String> {
        let file = self.file.as_ref()?;
        let mut location = file.clone();
        if let Some(line) = self.line {
            location.push_str(&format!(":{}", line));
            if let Some(column) = self.column {
                location.push_str(&format!(":{}", column));
            }
        }
        Some(location)
    }

    fn append_note(&mut self, text: &str) {
        match &mut self.note {
            Some(note) => {
                note.push('\n');
                note.push_str(text);
            }
            None => self.note = Some(text.to_string()),
        }
    }
}

/// Remove ANSI color sequences from a line
pub fn strip_ansi(line: &str) -> Cow<'_, str> {
    ANSI_ESCAPE_PATTERN.replace_all(line, "")
}

fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_MARKERS.iter().any(|marker| line.contains(marker))
}

fn has_error_indicator(line: &str) -> bool {
    ERROR_INDICATORS.iter().any(|marker| line.contains(marker))
}

/// Captures are all digits; values past `u32::MAX` saturate.
fn position(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

fn match_gcc(line: &str) -> Option<CompilationError> {
    let caps = GCC_ERROR_PATTERN.captures(line)?;
    Some(CompilationError {
        file: Some(caps[1].to_string()),
        line: Some(position(&caps[2])),
        column: Some(position(&caps[3])),
        message: caps[4].to_string(),
        ..Default::default()
    })
}

fn match_gcc_no_column(line: &str) -> Option<CompilationError> {
    let caps = GCC_ERROR_NO_COLUMN_PATTERN.captures(line)?;
    Some(CompilationError {
        file: Some(caps[1].to_string()),
        line: Some(position(&caps[2])),
        message: caps[3].to_string(),
        ..Default::default()
    })
}

fn match_msvc(line: &str) -> Option<CompilationError> {
    let caps = MSVC_ERROR_PATTERN.captures(line)?;
    Some(CompilationError {
        code: Some(format!("C{}", &caps[3])),
        file: Some(caps[1].to_string()),
        line: Some(position(&caps[2])),
        message: caps[4].to_string(),
        ..Default::default()
    })
}

fn match_simple(line: &str) -> Option<CompilationError> {
    let caps = SIMPLE_ERROR_PATTERN.captures(line)?;
    Some(CompilationError::new(&caps[1]))
}

/// Try every diagnostic shape, most specific first.
fn match_diagnostic(line: &str) -> Option<CompilationError> {
    match_gcc(line)
        .or_else(|| match_gcc_no_column(line))
        .or_else(|| match_msvc(line))
        .or_else(|| match_simple(line))
}

/// Parse a buffer of compiler output lines into compilation errors.
///
/// The open error is threaded through the fold and emitted whenever the next
/// diagnostic line starts, or at end of input. If nothing matched but the text
/// still mentions `error:`, a single generic error carrying the whole cleaned
/// output is returned so a failed build is never reported as clean.
pub fn parse_error_buffer<S: AsRef<str>>(lines: &[S]) -> Vec<CompilationError> {
    let cleaned: Vec<Cow<'_, str>> = lines.iter().map(|l| strip_ansi(l.as_ref())).collect();

    let (mut errors, open) = cleaned
        .iter()
        .map(|line| &**line)
        .filter(|line| !is_boilerplate(line))
        .fold(
            (Vec::new(), None::<CompilationError>),
            |(mut errors, open), line| match match_diagnostic(line) {
                Some(next) => {
                    errors.extend(open);
                    (errors, Some(next))
                }
                None => {
                    let open = open.map(|mut error| {
                        if let Some(caps) = NOTE_PATTERN.captures(line) {
                            error.append_note(&caps[1]);
                        }
                        error
                    });
                    (errors, open)
                }
            },
        );
    errors.extend(open);

    if errors.is_empty() && cleaned.iter().any(|line| has_error_indicator(line)) {
        warn!("Error indicators found but no diagnostic matched; using generic error");
        let all_output: String = cleaned.iter().map(|line| format!("{}\n", line)).collect();
        errors.push(CompilationError::new(FALLBACK_MESSAGE).with_note(all_output));
    }

    debug!(count = errors.len(), "Parsed compilation errors");
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gcc_full_location() {
        let errors =
            parse_error_buffer(&["src/main.cpp:10:5: error: 'foo' was not declared in this scope"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("src/main.cpp"));
        assert_eq!(errors[0].line, Some(10));
        assert_eq!(errors[0].column, Some(5));
        assert_eq!(errors[0].message, "'foo' was not declared in this scope");
        assert!(errors[0].code.is_none());
    }

    #[test]
    fn test_parse_gcc_without_column() {
        let errors = parse_error_buffer(&["src/main.cpp:15: error: expected ';' before '}'"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("src/main.cpp"));
        assert_eq!(errors[0].line, Some(15));
        assert!(errors[0].column.is_none());
        assert_eq!(errors[0].message, "expected ';' before '}'");
    }

    #[test]
    fn test_parse_msvc_format() {
        let errors =
            parse_error_buffer(&["main.cpp(42): error C2065: 'undeclared': undeclared identifier"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("main.cpp"));
        assert_eq!(errors[0].line, Some(42));
        assert_eq!(errors[0].code.as_deref(), Some("C2065"));
        assert_eq!(errors[0].message, "'undeclared': undeclared identifier");
    }

    #[test]
    fn test_parse_simple_error() {
        let errors = parse_error_buffer(&["error: ld returned 1 exit status"]);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].file.is_none());
        assert!(errors[0].line.is_none());
        assert_eq!(errors[0].message, "ld returned 1 exit status");
    }

    #[test]
    fn test_parse_fatal_error() {
        let errors = parse_error_buffer(&[
            "/tmp/test.cpp:2:10: fatal error: nonexistent_header.hpp: No such file or directory",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("/tmp/test.cpp"));
        assert_eq!(errors[0].line, Some(2));
        assert_eq!(errors[0].column, Some(10));
        assert_eq!(
            errors[0].message,
            "nonexistent_header.hpp: No such file or directory"
        );
    }

    #[test]
    fn test_multiple_errors_keep_input_order() {
        let errors = parse_error_buffer(&[
            "src/foo.cpp:5:10: error: 'bar' was not declared in this scope",
            "src/foo.cpp:8:3: error: expected ';' before 'return'",
        ]);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].file.as_deref(), Some("src/foo.cpp"));
        assert_eq!(errors[0].line, Some(5));
        assert_eq!(errors[1].file.as_deref(), Some("src/foo.cpp"));
        assert_eq!(errors[1].line, Some(8));
    }

    #[test]
    fn test_note_attaches_to_open_error() {
        let errors = parse_error_buffer(&[
            "src/main.cpp:10:5: error: 'vector' is not a member of 'std'",
            "   10 |     std::vector<int> v;",
            "      |     ^~~",
            "note: 'std::vector' is defined in header '<vector>'",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "'vector' is not a member of 'std'");
        assert_eq!(
            errors[0].note.as_deref(),
            Some("'std::vector' is defined in header '<vector>'")
        );
    }

    #[test]
    fn test_consecutive_notes_are_joined() {
        let errors = parse_error_buffer(&[
            "a.cpp:1:1: error: boom",
            "note: first",
            "  note: second",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].note.as_deref(), Some("first\nsecond"));
    }

    #[test]
    fn test_note_before_any_error_is_ignored() {
        let errors = parse_error_buffer(&["note: orphan", "x.cpp:3:1: error: late"]);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].note.is_none());
    }

    #[test]
    fn test_notes_go_to_most_recent_error() {
        let errors = parse_error_buffer(&[
            "a.cpp:1:1: error: first",
            "note: for first",
            "a.cpp:2:1: error: second",
            "note: for second",
        ]);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].note.as_deref(), Some("for first"));
        assert_eq!(errors[1].note.as_deref(), Some("for second"));
    }

    #[test]
    fn test_strip_ansi_codes() {
        let errors = parse_error_buffer(&[
            "\x1b[1m\x1b[31msrc/main.cpp:10:5: error:\x1b[0m undefined reference to 'foo'",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("src/main.cpp"));
        assert_eq!(errors[0].message, "undefined reference to 'foo'");
    }

    #[test]
    fn test_strip_ansi_is_idempotent() {
        let line = "\x1b[01;31m\x1b[Kerror:\x1b[m\x1b[K boom";
        let once = strip_ansi(line).into_owned();
        assert_eq!(strip_ansi(&once), once);
    }

    #[test]
    fn test_skip_boilerplate_lines() {
        let errors = parse_error_buffer(&[
            "In file included from src/main.cpp:1:",
            "include/header.hpp:5:10: error: 'missing' was not declared in this scope",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("include/header.hpp"));
    }

    #[test]
    fn test_boilerplate_error_line_does_not_open_error() {
        let errors = parse_error_buffer(&[
            "src/a.cpp:3:1: error: real",
            "src/b.hpp:9:2: error: required from here",
            "note: still belongs to the first",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "real");
        assert_eq!(errors[0].note.as_deref(), Some("still belongs to the first"));
    }

    #[test]
    fn test_simple_error_inside_noise() {
        let errors = parse_error_buffer(&[
            "Some unusual compiler output",
            "error: something went wrong",
            "More output",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "something went wrong");
    }

    #[test]
    fn test_fallback_generic_error() {
        let errors = parse_error_buffer(&[
            "weird error: format not matching standard patterns",
            "  at some location",
        ]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, FALLBACK_MESSAGE);
        assert_eq!(
            errors[0].note.as_deref(),
            Some("weird error: format not matching standard patterns\n  at some location\n")
        );
    }

    #[test]
    fn test_fallback_note_is_ansi_stripped() {
        let errors = parse_error_buffer(&["\x1b[31mweird error:\x1b[0m thing"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].note.as_deref(), Some("weird error: thing\n"));
    }

    #[test]
    fn test_fallback_covers_boilerplate_only_output() {
        let errors = parse_error_buffer(&["foo.hpp:3:1: error: required from here"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_oversized_line_number_saturates() {
        let errors = parse_error_buffer(&["a.cpp:99999999999:5: error: boom"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("a.cpp"));
        assert_eq!(errors[0].line, Some(u32::MAX));
        assert_eq!(errors[0].column, Some(5));
        assert_eq!(errors[0].message, "boom");
    }

    #[test]
    fn test_oversized_line_number_without_column() {
        let errors = parse_error_buffer(&["a.cpp:99999999999: error: huge"]);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].file.as_deref(), Some("a.cpp"));
        assert_eq!(errors[0].line, Some(u32::MAX));
        assert_eq!(errors[0].column, None);
    }

    #[test]
    fn test_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(parse_error_buffer(&lines).is_empty());
    }

    #[test]
    fn test_no_error_indicators() {
        let errors = parse_error_buffer(&[
            "Compiling src/main.cpp",
            "Linking executable",
            "Build completed successfully",
        ]);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_location_formatting() {
        let mut error = CompilationError::new("m");
        assert_eq!(error.location(), None);

        error.file = Some("a.cpp".to_string());
        assert_eq!(error.location().as_deref(), Some("a.cpp"));

        error.line = Some(3);
        assert_eq!(error.location().as_deref(), Some("a.cpp:3"));

        error.column = Some(7);
        assert_eq!(error.location().as_deref(), Some("a.cpp:3:7"));
    }

    #[test]
    fn test_column_without_line_is_not_rendered() {
        let error = CompilationError {
            file: Some("a.cpp".to_string()),
            column: Some(4),
            ..CompilationError::new("m")
        };
        assert_eq!(error.location().as_deref(), Some("a.cpp"));
    }
}
