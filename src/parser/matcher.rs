//! Pluggable line matchers.
//!
//! A matcher is a plain value: a name, a priority and a match function.
//! Engines are supported by building more matcher values, not by
//! implementing a trait hierarchy.

use super::schema::Frame;
use std::fmt;
use std::sync::Arc;

/// Function that tries to read one stack frame from one sanitized line
pub type LineMatchFn = dyn Fn(&str) -> Option<Frame> + Send + Sync;

/// Maps a frame filename to a module identifier
pub type ModuleResolver = Arc<dyn Fn(Option<&str>) -> Option<String> + Send + Sync>;

/// One engine-specific line matcher
///
/// **Public** - registered with `StackParser::new`
#[derive(Clone)]
pub struct LineMatcher {
    name: String,
    priority: i32,
    matcher: Arc<LineMatchFn>,
}

impl LineMatcher {
    /// Create a matcher; lower `priority` is tried first
    pub fn new<F>(name: impl Into<String>, priority: i32, matcher: F) -> Self
    where
        F: Fn(&str) -> Option<Frame> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            priority,
            matcher: Arc::new(matcher),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Attempt to parse `line` as a single frame
    pub fn try_match(&self, line: &str) -> Option<Frame> {
        (self.matcher)(line)
    }
}

impl fmt::Debug for LineMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineMatcher")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
