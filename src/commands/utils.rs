use crate::utils::config::{
    load_patterns, SdkFramePatterns, MAX_LINE_LENGTH, REPORT_SCHEMA_VERSION, STACKTRACE_LIMIT,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Display the effective SDK frame patterns
pub fn display_patterns(file: Option<&Path>, as_json: bool) -> Result<()> {
    let patterns = match file {
        Some(path) => load_patterns(path)
            .with_context(|| format!("Failed to load frame patterns from {}", path.display()))?,
        None => SdkFramePatterns::default(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&patterns.to_config())?);
        return Ok(());
    }

    println!("SDK Frame Patterns");
    println!("  wrapper (outermost frame): {}", patterns.wrapper.as_str());
    println!("  capture (innermost frame): {}", patterns.capture.as_str());
    println!();
    println!("Limits");
    println!("  max frames:      {}", STACKTRACE_LIMIT);
    println!("  max line length: {}", MAX_LINE_LENGTH);

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Stacktrace Parser v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", REPORT_SCHEMA_VERSION);
    println!();
    println!("Parses runtime stack traces into normalized frames.");
}
