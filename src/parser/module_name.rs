//! Module identifiers derived from frame filenames.
//!
//! Produces names such as `express.lib.router:index` for dependencies and
//! `routes.api:users` for application files below a base path.

use super::matcher::ModuleResolver;
use std::sync::Arc;

const SCRIPT_EXTENSIONS: &[&str] = &[".js", ".mjs", ".cjs"];
const NODE_MODULES_DIR: &str = "/node_modules/";

/// Build a resolver that names modules relative to `base_path`
///
/// **Public** - pass to `node_line_matcher`
pub fn module_from_filename(base_path: impl Into<String>) -> ModuleResolver {
    let base_path = normalize_separators(&base_path.into())
        .trim_end_matches('/')
        .to_string();

    Arc::new(move |filename: Option<&str>| filename.map(|f| resolve_module(f, &base_path)))
}

/// Module identifier for a single filename
///
/// **Public** - pure helper behind `module_from_filename`
pub fn resolve_module(filename: &str, base_path: &str) -> String {
    let normalized = normalize_separators(filename);

    let (dir, file) = match normalized.rfind('/') {
        Some(index) => (&normalized[..index], &normalized[index + 1..]),
        None => ("", normalized.as_str()),
    };

    let stem = SCRIPT_EXTENSIONS
        .iter()
        .find_map(|ext| file.strip_suffix(ext))
        .unwrap_or(file);

    if dir.is_empty() {
        return stem.to_string();
    }

    // Dependencies are named after their path inside the last node_modules
    let with_slash = format!("{}/", dir);
    if let Some(index) = with_slash.rfind(NODE_MODULES_DIR) {
        let package_dir = &with_slash[index + NODE_MODULES_DIR.len()..];
        let package = package_dir.trim_end_matches('/').replace('/', ".");
        return format!("{}:{}", package, stem);
    }

    if !base_path.is_empty() {
        if let Some(relative) = strip_base(dir, base_path) {
            if relative.is_empty() {
                return stem.to_string();
            }
            return format!("{}:{}", relative.replace('/', "."), stem);
        }
    }

    stem.to_string()
}

/// Directory relative to `base`, only on a path-segment boundary
fn strip_base<'a>(dir: &'a str, base: &str) -> Option<&'a str> {
    let rest = dir.strip_prefix(base)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_module() {
        assert_eq!(
            resolve_module("/app/node_modules/express/lib/router/index.js", "/app"),
            "express.lib.router:index"
        );
    }

    #[test]
    fn test_nested_node_modules_uses_last() {
        assert_eq!(
            resolve_module("/app/node_modules/a/node_modules/b/main.cjs", "/app"),
            "b:main"
        );
    }

    #[test]
    fn test_app_module_under_base() {
        assert_eq!(resolve_module("/app/routes/api/users.mjs", "/app"), "routes.api:users");
        assert_eq!(resolve_module("/app/server.js", "/app"), "server");
    }

    #[test]
    fn test_base_is_segment_boundary() {
        assert_eq!(resolve_module("/application/x/y.js", "/app"), "y");
    }

    #[test]
    fn test_outside_base_and_bare_file() {
        assert_eq!(resolve_module("/srv/other/thing.ts", "/app"), "thing.ts");
        assert_eq!(resolve_module("index.js", "/app"), "index");
    }

    #[test]
    fn test_windows_separators() {
        let resolve = module_from_filename(r"C:\app\");
        assert_eq!(
            resolve(Some(r"C:\app\lib\util.js")),
            Some("lib:util".to_string())
        );
    }

    #[test]
    fn test_absent_filename() {
        let resolve = module_from_filename("/app");
        assert_eq!(resolve(None), None);
    }
}
