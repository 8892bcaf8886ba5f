//! Composed stack parser.
//!
//! Splits raw stack text into lines, runs each line through the sanitizer
//! and the registered matchers, and normalizes the resulting frames.

use super::matcher::{LineMatcher, ModuleResolver};
use super::node::node_line_matcher;
use super::normalize::FrameNormalizer;
use super::sanitize::sanitize_line;
use super::schema::{Frame, ParseReport};
use crate::utils::config::{SdkFramePatterns, REPORT_SCHEMA_VERSION};
use log::{debug, trace};

/// Immutable, shareable stack parser
///
/// Matchers are sorted by priority once, at construction. A single
/// instance can be used from any number of threads.
#[derive(Debug, Clone)]
pub struct StackParser {
    matchers: Vec<LineMatcher>,
    normalizer: FrameNormalizer,
}

impl StackParser {
    /// Create a parser with the default SDK frame patterns
    ///
    /// **Public** - main constructor
    pub fn new(matchers: Vec<LineMatcher>) -> Self {
        Self::with_patterns(matchers, SdkFramePatterns::default())
    }

    /// Create a parser recognizing a custom set of SDK frames
    pub fn with_patterns(mut matchers: Vec<LineMatcher>, patterns: SdkFramePatterns) -> Self {
        // Stable: equal priorities keep registration order
        matchers.sort_by_key(LineMatcher::priority);

        debug!(
            "Stack parser built with matchers: {:?}",
            matchers.iter().map(LineMatcher::name).collect::<Vec<_>>()
        );

        Self {
            matchers,
            normalizer: FrameNormalizer::new(patterns),
        }
    }

    /// Registered matchers in the order they are tried
    pub fn matchers(&self) -> &[LineMatcher] {
        &self.matchers
    }

    /// Parse raw stack text into normalized frames
    ///
    /// **Public** - main entry point for parsing
    ///
    /// # Arguments
    /// * `stack` - newline-delimited stack text in the runtime's native format
    /// * `skip_first` - number of leading lines to ignore (e.g. the message line)
    ///
    /// # Returns
    /// Frames outermost call first, crash site last. Unrecognized and
    /// over-long lines contribute nothing; this never fails.
    pub fn parse(&self, stack: &str, skip_first: usize) -> Vec<Frame> {
        let mut frames = Vec::new();

        for raw_line in stack.split('\n').skip(skip_first) {
            let Some(line) = sanitize_line(raw_line) else {
                continue;
            };

            match self.match_line(&line) {
                Some(frame) => frames.push(frame),
                None => trace!("No matcher for stack line: {}", line),
            }
        }

        debug!("Matched {} stack frames", frames.len());

        self.normalizer.normalize(frames)
    }

    /// First successful matcher wins
    ///
    /// **Private** - internal helper for parse
    fn match_line(&self, line: &str) -> Option<Frame> {
        self.matchers.iter().find_map(|matcher| matcher.try_match(line))
    }
}

/// Parser configured with only the Node/V8 matcher
///
/// **Public** - convenience for the common case
pub fn node_stack_parser(module_resolver: Option<ModuleResolver>) -> StackParser {
    StackParser::new(vec![node_line_matcher(module_resolver)])
}

/// Either a ready parser or the matchers to build one from
///
/// **Public** - lets callers configure parsing at either level
#[derive(Debug, Clone)]
pub enum StackParserOptions {
    Parser(StackParser),
    LineMatchers(Vec<LineMatcher>),
}

impl StackParserOptions {
    /// Resolve to a parser; `patterns` only applies to a matcher list
    pub fn into_parser(self, patterns: SdkFramePatterns) -> StackParser {
        match self {
            StackParserOptions::Parser(parser) => parser,
            StackParserOptions::LineMatchers(matchers) => {
                StackParser::with_patterns(matchers, patterns)
            }
        }
    }
}

impl From<StackParser> for StackParserOptions {
    fn from(parser: StackParser) -> Self {
        StackParserOptions::Parser(parser)
    }
}

impl From<Vec<LineMatcher>> for StackParserOptions {
    fn from(matchers: Vec<LineMatcher>) -> Self {
        StackParserOptions::LineMatchers(matchers)
    }
}

/// Wrap normalized frames in a report document
///
/// **Public** - used by commands to create final output
pub fn to_report(frames: Vec<Frame>) -> ParseReport {
    use chrono::Utc;

    ParseReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        frame_count: frames.len(),
        in_app_count: frames.iter().filter(|f| f.in_app).count(),
        frames,
        generated_at: Utc::now().to_rfc3339(),
    }
}
