//! Frame normalization.
//!
//! Turns matched frames (innermost call first, as printed by the runtime)
//! into the canonical order (outermost call first, crash site last):
//!
//! 1. keep at most `STACKTRACE_LIMIT` frames from the top of the trace
//! 2. drop the instrumentation wrapper frame at the outer end
//! 3. reverse
//! 4. drop the capture-API frame at the inner end
//! 5. backfill missing filename and function

use super::schema::Frame;
use crate::utils::config::{SdkFramePatterns, STACKTRACE_LIMIT, UNKNOWN_FUNCTION};
use log::{debug, trace};

/// Strips instrumentation frames and reorders matched frames
///
/// **Public** - owned by `StackParser`, usable on its own for pre-matched frames
#[derive(Debug, Clone, Default)]
pub struct FrameNormalizer {
    patterns: SdkFramePatterns,
}

impl FrameNormalizer {
    pub fn new(patterns: SdkFramePatterns) -> Self {
        Self { patterns }
    }

    /// Normalize frames given in runtime order (innermost first)
    ///
    /// # Returns
    /// Frames outermost first, at most `STACKTRACE_LIMIT` long, with at most
    /// one instrumentation frame removed from each end
    pub fn normalize(&self, frames: Vec<Frame>) -> Vec<Frame> {
        if frames.is_empty() {
            return frames;
        }

        let mut frames = frames;
        if frames.len() > STACKTRACE_LIMIT {
            debug!(
                "Truncating stack trace from {} to {} frames",
                frames.len(),
                STACKTRACE_LIMIT
            );
            frames.truncate(STACKTRACE_LIMIT);
        }

        // Outer end: the wrapper around user code is the last printed line
        if self.last_function_matches(&frames, |f| self.patterns.is_wrapper(f)) {
            trace!("Removing instrumentation wrapper frame");
            frames.pop();
        }

        frames.reverse();

        // Inner end: the capture call was the first printed line
        if self.last_function_matches(&frames, |f| self.patterns.is_capture(f)) {
            trace!("Removing capture call frame");
            frames.pop();
        }

        let anchor_filename = match frames.last() {
            Some(frame) => frame.filename.clone(),
            None => return frames,
        };

        frames
            .into_iter()
            .map(|mut frame| {
                if frame.filename.is_none() {
                    frame.filename = anchor_filename.clone();
                }
                if frame.function.is_none() {
                    frame.function = Some(UNKNOWN_FUNCTION.to_string());
                }
                frame
            })
            .collect()
    }

    fn last_function_matches(&self, frames: &[Frame], is_match: impl Fn(&str) -> bool) -> bool {
        frames
            .last()
            .and_then(|frame| frame.function.as_deref())
            .is_some_and(is_match)
    }
}
