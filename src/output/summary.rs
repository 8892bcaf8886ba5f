//! Plain-text rendering of a parse report.

use crate::parser::schema::{Frame, ParseReport};

const FUNCTION_WIDTH: usize = 32;
const LOCATION_WIDTH: usize = 44;

/// Render frames as a table, crash site last
///
/// **Public** - used by the parse command's `--summary` flag
///
/// # Arguments
/// * `report` - Report to render
/// * `max_lines` - Maximum number of frames shown (the innermost ones)
pub fn generate_text_summary(report: &ParseReport, max_lines: usize) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "  {:<3} {:<fw$} {:<lw$} {}",
        "#",
        "FUNCTION",
        "LOCATION",
        "APP",
        fw = FUNCTION_WIDTH,
        lw = LOCATION_WIDTH
    ));
    lines.push(format!("  {}", "-".repeat(FUNCTION_WIDTH + LOCATION_WIDTH + 9)));

    // The crash site is the interesting end, so show the tail
    let skipped = report.frames.len().saturating_sub(max_lines);

    for (index, frame) in report.frames.iter().enumerate().skip(skipped) {
        lines.push(format!(
            "  {:<3} {:<fw$} {:<lw$} {}",
            index,
            truncate_left(frame.function.as_deref().unwrap_or("?"), FUNCTION_WIDTH),
            truncate_left(&location(frame), LOCATION_WIDTH),
            if frame.in_app { "yes" } else { "-" },
            fw = FUNCTION_WIDTH,
            lw = LOCATION_WIDTH
        ));
    }

    if skipped > 0 {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing last {} of {} frames)",
            max_lines,
            report.frames.len()
        ));
    }

    lines.join("\n")
}

/// `file:line:col`, omitting the parts that are absent
fn location(frame: &Frame) -> String {
    let mut location = frame.filename.clone().unwrap_or_else(|| "?".to_string());
    if let Some(line) = frame.line {
        location.push_str(&format!(":{}", line));
        if let Some(column) = frame.column {
            location.push_str(&format!(":{}", column));
        }
    }
    location
}

/// Keep the end of long values, where file names and methods live
fn truncate_left(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        return value.to_string();
    }
    let tail: String = value.chars().skip(count - (width - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::to_report;

    fn frame(function: &str, filename: &str, in_app: bool) -> Frame {
        Frame {
            filename: Some(filename.to_string()),
            function: Some(function.to_string()),
            line: Some(3),
            column: Some(7),
            in_app,
            ..Frame::default()
        }
    }

    #[test]
    fn test_summary_lists_frames() {
        let report = to_report(vec![
            frame("main", "/app/index.js", true),
            frame("Object.foo", "/app/node_modules/bar/index.js", false),
        ]);
        let summary = generate_text_summary(&report, 10);

        assert!(summary.contains("main"));
        assert!(summary.contains("/app/index.js:3:7"));
        assert!(!summary.contains("Showing"));
    }

    #[test]
    fn test_summary_shows_tail() {
        let frames = (0..5)
            .map(|i| frame(&format!("f{}", i), "/app/a.js", true))
            .collect();
        let summary = generate_text_summary(&to_report(frames), 2);

        assert!(!summary.contains("f2"));
        assert!(summary.contains("f3"));
        assert!(summary.contains("f4"));
        assert!(summary.contains("(Showing last 2 of 5 frames)"));
    }

    #[test]
    fn test_truncate_left() {
        assert_eq!(truncate_left("short", 10), "short");
        assert_eq!(truncate_left("/very/long/path/file.js", 10), ".../file.js");
    }
}
