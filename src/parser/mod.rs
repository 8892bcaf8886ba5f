//! Stack trace parsing and frame schema definitions.
//!
//! This module handles:
//! - Sanitizing raw stack lines
//! - Matching lines with pluggable per-engine matchers
//! - Normalizing frame order and stripping instrumentation frames
//! - Defining the frame and report schema

pub mod function_name;
pub mod matcher;
pub mod module_name;
pub mod node;
pub mod normalize;
pub mod sanitize;
pub mod schema;
pub mod stack_parser;

// Re-export main types
pub use function_name::{function_name, lookup_function_name, Invocable, NameLookup, NamedFn};
pub use matcher::{LineMatcher, ModuleResolver};
pub use module_name::module_from_filename;
pub use node::node_line_matcher;
pub use normalize::FrameNormalizer;
pub use schema::{Frame, ParseReport};
pub use stack_parser::{node_stack_parser, to_report, StackParser, StackParserOptions};
