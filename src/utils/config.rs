//! Configuration and constants for stack parsing.

use crate::utils::error::ConfigError;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Maximum number of frames kept from a single trace
pub const STACKTRACE_LIMIT: usize = 50;

/// Lines longer than this (in characters) are never handed to a matcher
pub const MAX_LINE_LENGTH: usize = 1024;

/// Priority of the Node/V8 line matcher
pub const NODE_MATCHER_PRIORITY: i32 = 90;

/// Placeholder for frames whose function could not be determined
pub const UNKNOWN_FUNCTION: &str = "?";

/// Placeholder for unnamed functions
pub const ANONYMOUS_FUNCTION: &str = "<anonymous>";

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

// Default names of the instrumentation layer's own frames.
// The wrapper sits at the outermost end of a raw trace, the capture call at the innermost.
pub const DEFAULT_WRAPPER_PATTERN: &str = "sentryWrapped";
pub const DEFAULT_CAPTURE_PATTERN: &str = "captureMessage|captureException";

/// Function-name patterns identifying frames introduced by the instrumentation layer
///
/// **Public** - handed to `StackParser::with_patterns`
#[derive(Debug, Clone)]
pub struct SdkFramePatterns {
    /// Matches the synchronous wrapper around user code (outermost frame)
    pub wrapper: Regex,

    /// Matches the public capture entry points (innermost frame)
    pub capture: Regex,
}

impl SdkFramePatterns {
    /// Build patterns from raw regular expression strings
    ///
    /// # Errors
    /// * `ConfigError::InvalidPattern` - either string is not a valid regex
    pub fn new(wrapper: &str, capture: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            wrapper: compile_pattern(wrapper)?,
            capture: compile_pattern(capture)?,
        })
    }

    /// True if `function` names the wrapping function
    pub fn is_wrapper(&self, function: &str) -> bool {
        self.wrapper.is_match(function)
    }

    /// True if `function` names a capture entry point
    pub fn is_capture(&self, function: &str) -> bool {
        self.capture.is_match(function)
    }

    /// Raw pattern strings, as they would be written to a pattern file
    pub fn to_config(&self) -> PatternConfig {
        PatternConfig {
            wrapper: self.wrapper.as_str().to_string(),
            capture: self.capture.as_str().to_string(),
        }
    }
}

impl Default for SdkFramePatterns {
    fn default() -> Self {
        // The default patterns are constants and always compile
        Self {
            wrapper: Regex::new(DEFAULT_WRAPPER_PATTERN).unwrap(),
            capture: Regex::new(DEFAULT_CAPTURE_PATTERN).unwrap(),
        }
    }
}

/// On-disk form of `SdkFramePatterns`
///
/// Missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default = "default_wrapper")]
    pub wrapper: String,

    #[serde(default = "default_capture")]
    pub capture: String,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            wrapper: default_wrapper(),
            capture: default_capture(),
        }
    }
}

impl TryFrom<PatternConfig> for SdkFramePatterns {
    type Error = ConfigError;

    fn try_from(config: PatternConfig) -> Result<Self, Self::Error> {
        Self::new(&config.wrapper, &config.capture)
    }
}

fn default_wrapper() -> String {
    DEFAULT_WRAPPER_PATTERN.to_string()
}

fn default_capture() -> String {
    DEFAULT_CAPTURE_PATTERN.to_string()
}

fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Load SDK frame patterns from a JSON file
///
/// **Public** - used by the CLI `--patterns` option
///
/// # Errors
/// * `ConfigError::ReadFailed` - file cannot be opened
/// * `ConfigError::InvalidFile` - file is not a valid pattern document
/// * `ConfigError::InvalidPattern` - a pattern does not compile
pub fn load_patterns(path: impl AsRef<Path>) -> Result<SdkFramePatterns, ConfigError> {
    let path = path.as_ref();
    debug!("Loading frame patterns from: {}", path.display());

    let file = File::open(path)?;
    let config: PatternConfig = serde_json::from_reader(file)?;

    debug!(
        "Frame patterns: wrapper='{}', capture='{}'",
        config.wrapper, config.capture
    );

    SdkFramePatterns::try_from(config)
}
