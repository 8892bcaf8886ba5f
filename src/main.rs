//! Stacktrace Parser CLI
//!
//! Reads a raw stack trace and prints the normalized frames as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use stacktrace_parser::commands::{
    display_patterns, display_version, execute_parse, validate_args, ParseArgs,
};

/// Stacktrace Parser - normalize runtime stack traces
#[derive(Parser, Debug)]
#[command(name = "stack-parse")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a stack trace into normalized frames
    Parse {
        /// Stack trace file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Number of leading lines to skip (e.g. the error message)
        #[arg(short, long, default_value = "0")]
        skip: usize,

        /// Output path for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write single-line JSON
        #[arg(long)]
        compact: bool,

        /// JSON file with custom SDK frame patterns
        #[arg(long, env = "STACK_PARSE_PATTERNS")]
        patterns: Option<PathBuf>,

        /// Application root used to derive module names
        #[arg(long)]
        base_path: Option<String>,

        /// Print text summary to stderr
        #[arg(long)]
        summary: bool,

        /// Number of frames shown in the summary
        #[arg(long, default_value = "20")]
        summary_frames: usize,
    },

    /// Display the SDK frame patterns in effect
    Patterns {
        /// JSON file with custom SDK frame patterns
        #[arg(long, env = "STACK_PARSE_PATTERNS")]
        file: Option<PathBuf>,

        /// Print as a pattern file
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, so the JSON on stdout stays clean
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Parse {
            input,
            skip,
            output,
            compact,
            patterns,
            base_path,
            summary,
            summary_frames,
        } => {
            let args = ParseArgs {
                input,
                skip_first: skip,
                output,
                pretty: !compact,
                patterns,
                base_path,
                print_summary: summary,
                summary_frames,
            };

            validate_args(&args)?;
            execute_parse(args)?;
        }

        Commands::Patterns { file, json } => {
            display_patterns(file.as_deref(), json)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
