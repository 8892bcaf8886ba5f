//! Stacktrace Parser
//!
//! Converts raw runtime stack traces (free-form, engine-specific text)
//! into an ordered sequence of structured frames suitable for display
//! and error grouping.
//!
//! ## Getting Started
//!
//! ```
//! use stacktrace_parser::parser::node_stack_parser;
//!
//! let parser = node_stack_parser(None);
//! let frames = parser.parse("Error: boom\n    at foo (/app/file.js:10:5)", 1);
//!
//! assert_eq!(frames[0].function.as_deref(), Some("foo"));
//! assert!(frames[0].in_app);
//! ```
//!
//! Frames come back outermost call first, crash site last, with at most
//! 50 entries and the instrumentation layer's own frames removed.
//!
//! The `stack-parse` binary wraps the same parser for use from the shell:
//!
//! ```bash
//! node app.js 2>&1 | stack-parse parse --skip 1 --summary
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

pub use parser::{Frame, LineMatcher, StackParser};
