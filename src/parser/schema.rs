//! Frame and report schema definitions.
//!
//! `Frame` is what the parser produces. `ParseReport` is the JSON
//! document the CLI writes around a parsed trace.

use serde::{Deserialize, Serialize};

/// One entry in a stack trace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Source file or pseudo-location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Best-effort human-readable call label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Resolved module identifier (engine-specific)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Line number, absent if unparsable
    #[serde(default, rename = "lineno", skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Column number, absent if unparsable
    #[serde(default, rename = "colno", skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    /// True if the frame belongs to application code
    #[serde(default)]
    pub in_app: bool,
}

impl Frame {
    /// Frame carrying only a filename (used for separator marker lines)
    pub fn marker(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }
}

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Number of frames after normalization
    pub frame_count: usize,

    /// Number of frames flagged as application code
    pub in_app_count: usize,

    /// Normalized frames, oldest call first
    pub frames: Vec<Frame>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}
