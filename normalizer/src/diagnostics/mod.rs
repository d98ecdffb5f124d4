//! Compiler Diagnostic Module
//!
//! Turns raw compiler stderr into [`CompilationError`] records:
//!
//! ```text
//! raw lines → strip ANSI → drop boilerplate → match (gcc → gcc no-col → msvc → bare) → notes
//!                                                                     ↓ nothing matched
//!                                                    generic "Compilation failed" fallback
//! ```

pub mod error_parser;

pub use error_parser::{parse_error_buffer, strip_ansi, CompilationError, FALLBACK_MESSAGE};
