//! Node.js / V8 stack line matcher.
//!
//! Recognizes lines such as:
//!
//! ```text
//!     at Object.foo (/app/lib/foo.js:10:5)
//!     at async handler (file:///app/server.mjs:3:12)
//!     at eval (native)
//!     at /app/index.js:1:1
//! ```

use super::matcher::{LineMatcher, ModuleResolver};
use super::schema::Frame;
use crate::utils::config::{ANONYMOUS_FUNCTION, NODE_MATCHER_PRIORITY};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// Separator line some runtimes print between async segments
static SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*-{4,}$").unwrap());

// 1: call-site label, 2: file, 3: line, 4: column, 5: bare location (e.g. "native")
static FRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"at (?:async )?(?:(.+?)\s+\()?(?:(.+):([0-9]+):([0-9]+)?|([^)]+))\)?").unwrap()
});

/// Build the Node/V8 line matcher
///
/// **Public** - the reference engine matcher, priority 90
///
/// # Arguments
/// * `module_resolver` - optional hook filling `Frame::module` from the filename
pub fn node_line_matcher(module_resolver: Option<ModuleResolver>) -> LineMatcher {
    LineMatcher::new("node", NODE_MATCHER_PRIORITY, move |line| {
        match_node_line(line, module_resolver.as_ref())
    })
}

/// Parse one sanitized line in Node/V8 format
///
/// **Public** - exposed for engines that want to reuse the Node rules
pub fn match_node_line(line: &str, module_resolver: Option<&ModuleResolver>) -> Option<Frame> {
    if SEPARATOR_REGEX.is_match(line) {
        return Some(Frame::marker(line));
    }

    let captures = FRAME_REGEX.captures(line)?;

    let function = function_label(captures.get(1).map(|m| m.as_str()));

    let filename = captures.get(2).map(|m| {
        let raw = m.as_str();
        raw.strip_prefix("file://").unwrap_or(raw).to_string()
    });

    let is_native = captures.get(5).is_some_and(|m| m.as_str() == "native");
    let is_internal = is_native || filename.as_deref().is_some_and(|f| !is_filesystem_path(f));

    // in_app is everything that is not a runtime internal or a dependency
    let in_app = !is_internal
        && filename
            .as_deref()
            .is_some_and(|f| !f.contains("node_modules/"));

    let module = module_resolver.and_then(|resolve| resolve(filename.as_deref()));

    Some(Frame {
        filename,
        function: Some(function),
        module,
        line: parse_position(&captures, 3),
        column: parse_position(&captures, 4),
        in_app,
    })
}

/// Derive the function label from the call-site text before `(`
///
/// **Private** - internal helper for match_node_line
fn function_label(label: Option<&str>) -> String {
    let mut function_name = label.map(str::to_string);
    let mut type_name: Option<&str> = None;
    let mut method_name: Option<&str> = None;

    if let Some(label) = label {
        if let Some(mut method_start) = label.rfind('.') {
            // "Foo..bar" keeps the double dot with the method
            if method_start > 0 && label.as_bytes()[method_start - 1] == b'.' {
                method_start -= 1;
            }

            if method_start > 0 {
                let mut object = &label[..method_start];
                let method = &label[method_start + 1..];

                // Module wrapper artifact: "Object.Module._compile" -> "Module._compile"
                if let Some(object_end) = object.find(".Module").filter(|&end| end > 0) {
                    function_name = Some(label[object_end + 1..].to_string());
                    object = &object[..object_end];
                }

                if !method.is_empty() {
                    type_name = Some(object);
                    method_name = Some(method);
                }

                if method == ANONYMOUS_FUNCTION {
                    method_name = None;
                    function_name = None;
                }
            }
        }
    }

    function_name.unwrap_or_else(|| {
        let method = method_name.unwrap_or(ANONYMOUS_FUNCTION);
        match type_name {
            Some(type_name) => format!("{}.{}", type_name, method),
            None => method.to_string(),
        }
    })
}

/// Absolute, relative or Windows drive-letter path
fn is_filesystem_path(filename: &str) -> bool {
    filename.starts_with('/') || filename.starts_with('.') || filename.get(1..3) == Some(":\\")
}

/// Line and column are 1-based; zero or unparsable digits are dropped
fn parse_position(captures: &Captures<'_>, group: usize) -> Option<u32> {
    captures
        .get(group)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn parse(line: &str) -> Frame {
        match_node_line(line, None).unwrap()
    }

    #[test]
    fn test_simple_frame() {
        assert_eq!(
            parse("    at foo (/app/file.js:10:5)"),
            Frame {
                filename: Some("/app/file.js".to_string()),
                function: Some("foo".to_string()),
                module: None,
                line: Some(10),
                column: Some(5),
                in_app: true,
            }
        );
    }

    #[test]
    fn test_separator_line() {
        let frame = parse("    ------");
        assert_eq!(frame, Frame::marker("    ------"));
    }

    #[test]
    fn test_three_dashes_is_not_separator() {
        assert!(match_node_line("---", None).is_none());
    }

    #[test]
    fn test_unmatched_line() {
        assert!(match_node_line("Error: something broke", None).is_none());
    }

    #[test]
    fn test_native_frame() {
        let frame = parse("at eval (native)");
        assert_eq!(frame.function.as_deref(), Some("eval"));
        assert_eq!(frame.filename, None);
        assert!(!frame.in_app);
    }

    #[test]
    fn test_node_modules_not_in_app() {
        let frame = parse("at Object.foo (/app/node_modules/bar/index.js:3:1)");
        assert_eq!(frame.function.as_deref(), Some("Object.foo"));
        assert!(!frame.in_app);
    }

    #[test]
    fn test_runtime_internal_not_in_app() {
        let frame = parse("at Module._compile (node:internal/modules/cjs/loader:1105:14)");
        assert_eq!(frame.function.as_deref(), Some("Module._compile"));
        assert_eq!(frame.filename.as_deref(), Some("node:internal/modules/cjs/loader"));
        assert!(!frame.in_app);
    }

    #[test]
    fn test_file_scheme_stripped() {
        let frame = parse("at async handler (file:///app/server.mjs:3:12)");
        assert_eq!(frame.filename.as_deref(), Some("/app/server.mjs"));
        assert_eq!(frame.function.as_deref(), Some("handler"));
        assert!(frame.in_app);
    }

    #[test]
    fn test_windows_path_in_app() {
        let frame = parse(r"at run (C:\app\index.js:7:9)");
        assert_eq!(frame.filename.as_deref(), Some(r"C:\app\index.js"));
        assert!(frame.in_app);
    }

    #[test]
    fn test_relative_path_in_app() {
        assert!(parse("at run (./lib/run.js:1:1)").in_app);
    }

    #[test]
    fn test_no_label() {
        let frame = parse("at /app/index.js:1:2");
        assert_eq!(frame.function.as_deref(), Some("<anonymous>"));
        assert_eq!(frame.filename.as_deref(), Some("/app/index.js"));
        assert_eq!(frame.line, Some(1));
        assert_eq!(frame.column, Some(2));
    }

    #[test]
    fn test_anonymous_method_keeps_type() {
        let frame = parse("at Object.<anonymous> (/app/index.js:5:3)");
        assert_eq!(frame.function.as_deref(), Some("Object.<anonymous>"));
    }

    #[test]
    fn test_module_wrapper_trimmed() {
        let frame = parse("at Object.Module._extensions..js (/app/loader.js:1:1)");
        assert_eq!(frame.function.as_deref(), Some("Module._extensions..js"));
    }

    #[test]
    fn test_double_dot_label() {
        assert_eq!(function_label(Some("Foo..bar")), "Foo..bar");
    }

    #[test]
    fn test_missing_column() {
        let frame = parse("at foo (/app/file.js:10:)");
        assert_eq!(frame.line, Some(10));
        assert_eq!(frame.column, None);
    }

    #[test]
    fn test_bare_location_token() {
        let frame = parse("at async Promise.all (index 0)");
        assert_eq!(frame.function.as_deref(), Some("Promise.all"));
        assert_eq!(frame.filename, None);
        assert!(!frame.in_app);
    }

    #[test]
    fn test_non_ascii_digits_are_not_positions() {
        let frame = parse("at foo (/app/a.js:١:٢)");
        assert_eq!(frame.function.as_deref(), Some("foo"));
        assert_eq!(frame.filename, None);
        assert_eq!(frame.line, None);
        assert!(!frame.in_app);
    }

    #[test]
    fn test_module_resolver_applied() {
        let resolver: ModuleResolver =
            Arc::new(|filename: Option<&str>| filename.map(|f| format!("mod:{}", f)));
        let frame = match_node_line("at foo (/app/file.js:1:1)", Some(&resolver)).unwrap();
        assert_eq!(frame.module.as_deref(), Some("mod:/app/file.js"));
    }

    #[test]
    fn test_matcher_priority() {
        assert_eq!(node_line_matcher(None).priority(), 90);
    }
}
