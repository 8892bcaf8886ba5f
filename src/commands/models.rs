use std::path::PathBuf;

/// Arguments for the parse command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ParseArgs {
    /// Stack trace file (None = read stdin)
    pub input: Option<PathBuf>,

    /// Leading lines to skip before matching
    pub skip_first: usize,

    /// Output path for the JSON report (None = stdout)
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    pub pretty: bool,

    /// JSON file overriding the SDK frame patterns
    pub patterns: Option<PathBuf>,

    /// Application root used to derive module names
    pub base_path: Option<String>,

    /// Print text summary to stderr
    pub print_summary: bool,

    /// Number of frames shown in the summary
    pub summary_frames: usize,
}

impl Default for ParseArgs {
    fn default() -> Self {
        Self {
            input: None,
            skip_first: 0,
            output: None,
            pretty: true,
            patterns: None,
            base_path: None,
            print_summary: false,
            summary_frames: 20,
        }
    }
}
