//! Parse command implementation.
//!
//! The parse command:
//! 1. Reads raw stack text from a file or stdin
//! 2. Builds the stack parser (patterns, module resolver)
//! 3. Parses and normalizes the frames
//! 4. Writes the JSON report

use super::models::ParseArgs;
use crate::output::{generate_text_summary, write_report, write_report_to};
use crate::parser::{module_from_filename, node_line_matcher, to_report, ParseReport, StackParser};
use crate::utils::config::{load_patterns, SdkFramePatterns, STACKTRACE_LIMIT};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Execute the parse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file cannot be read
/// * Pattern file is missing or invalid
/// * Report cannot be written
pub fn execute_parse(args: ParseArgs) -> Result<ParseReport> {
    let start_time = Instant::now();

    info!("Step 1/3: Reading stack trace...");
    let stack = read_input(args.input.as_deref()).context("Failed to read stack trace")?;
    debug!("Read {} bytes of stack text", stack.len());

    info!("Step 2/3: Parsing frames...");
    let parser = build_parser(&args)?;
    let frames = parser.parse(&stack, args.skip_first);
    let report = to_report(frames);

    info!(
        "Parsed {} frames ({} in app)",
        report.frame_count, report.in_app_count
    );

    info!("Step 3/3: Writing report...");
    match &args.output {
        Some(path) => {
            write_report(&report, path, args.pretty).context("Failed to write report JSON")?;
            info!("✓ Report written to: {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_report_to(&report, stdout.lock(), args.pretty)
                .context("Failed to write report to stdout")?;
        }
    }

    // Summary goes to stderr so stdout stays valid JSON
    if args.print_summary {
        eprintln!("\n{}", "=".repeat(80));
        eprintln!("STACK SUMMARY");
        eprintln!("{}", "=".repeat(80));
        eprintln!("Frames:        {}", report.frame_count);
        eprintln!("In-app frames: {}", report.in_app_count);
        eprintln!("\n{}", generate_text_summary(&report, args.summary_frames));
        eprintln!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Parse completed in {:.3}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Build the parser from the command arguments
///
/// **Private** - internal helper for execute_parse
fn build_parser(args: &ParseArgs) -> Result<StackParser> {
    let patterns = match &args.patterns {
        Some(path) => load_patterns(path)
            .with_context(|| format!("Failed to load frame patterns from {}", path.display()))?,
        None => SdkFramePatterns::default(),
    };

    let resolver = args.base_path.clone().map(module_from_filename);

    Ok(StackParser::with_patterns(
        vec![node_line_matcher(resolver)],
        patterns,
    ))
}

/// Read stack text from a file, or stdin when no path is given
///
/// **Private** - internal helper for execute_parse
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Cannot read stdin")?;
            Ok(buffer)
        }
    }
}

/// Validate parse arguments
///
/// **Public** - can be called before execute_parse for early validation
pub fn validate_args(args: &ParseArgs) -> Result<()> {
    if let Some(input) = &args.input {
        if !input.is_file() {
            anyhow::bail!("Input is not a file: {}", input.display());
        }
    }

    if let Some(patterns) = &args.patterns {
        if !patterns.is_file() {
            anyhow::bail!("Pattern file not found: {}", patterns.display());
        }
    }

    if args.print_summary && args.summary_frames == 0 {
        anyhow::bail!("summary_frames must be greater than 0");
    }

    if args.print_summary && args.summary_frames > STACKTRACE_LIMIT {
        anyhow::bail!("summary_frames is too large (max {})", STACKTRACE_LIMIT);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_default() {
        assert!(validate_args(&ParseArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_missing_input() {
        let args = ParseArgs {
            input: Some(PathBuf::from("/nonexistent/stack.txt")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_patterns() {
        let args = ParseArgs {
            patterns: Some(PathBuf::from("/nonexistent/patterns.json")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_frames_zero() {
        let args = ParseArgs {
            print_summary: true,
            summary_frames: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_frames_too_large() {
        let args = ParseArgs {
            print_summary: true,
            summary_frames: 500,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_frames_ignored_without_summary() {
        let args = ParseArgs {
            print_summary: false,
            summary_frames: 500,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_build_parser_with_base_path() {
        let args = ParseArgs {
            base_path: Some("/app".to_string()),
            ..Default::default()
        };
        let parser = build_parser(&args).unwrap();
        let frames = parser.parse("at foo (/app/lib/util.js:1:1)", 0);
        assert_eq!(frames[0].module.as_deref(), Some("lib:util"));
    }
}
