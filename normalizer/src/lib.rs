//! TDD Guard report normalizer
//!
//! Turns the raw output of a C++ build-and-test run into the single result
//! document the TDD Guard hook reads:
//!
//! ```text
//! captured lines ─┬─► report::parse_report ─────────► Vec<TestOutcome> ──┐
//!                 │   (GoogleTest / Catch2 JSON)                          ├─► transform ─► GuardOutput
//!                 └─► diagnostics::parse_error_buffer ► Vec<CompilationError> ┘
//!                     (GCC / Clang / MSVC stderr)
//! ```
//!
//! The core is synchronous and never fails: unparseable input degrades to a
//! synthetic failed `compilation` module. Only [`persist::save_results`] and
//! [`config::ProjectRoot::validate`] return errors.
//!
//! # Usage
//!
//! ```rust,ignore
//! use normalizer::{analyze, config::{ProjectRoot, ReporterConfig}, persist::save_results};
//!
//! let output = analyze(&captured_lines);
//! let config = ReporterConfig::for_project(&ProjectRoot::validate("/abs/project")?);
//! save_results(&config, &output)?;
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod transform;

pub use diagnostics::{parse_error_buffer, CompilationError};
pub use error::{GuardError, GuardResult, ReportError};
pub use pipeline::analyze;
pub use report::{parse_report, Framework, ParsedReport, TestOutcome, TestState};
pub use transform::{transform_outcomes, GuardOutput, Reason, TestError, TestModule, TestResult};
