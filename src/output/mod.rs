//! Output writers for parse reports.
//!
//! This module handles writing data in various formats:
//! - JSON reports (pretty and compact)
//! - Text summaries

pub mod json;
pub mod summary;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report, write_report_to};
pub use summary::generate_text_summary;
