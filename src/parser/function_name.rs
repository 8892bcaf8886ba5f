//! Defensive function-name extraction.
//!
//! Used when a frame label has to come from a value rather than from stack
//! text. Every failure maps to `<anonymous>`; nothing here returns an error
//! to the caller.

use crate::utils::config::ANONYMOUS_FUNCTION;
use crate::utils::error::NameAccessError;
use log::trace;
use std::borrow::Cow;
use std::ops::Deref;

/// A value that can be called and may expose a declared name
pub trait Invocable {
    /// Declared name of the callable
    ///
    /// Implementations backed by restricted environments report refusal as
    /// `Err` rather than panicking.
    fn declared_name(&self) -> Result<Cow<'_, str>, NameAccessError>;
}

/// Outcome of a name lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameLookup {
    /// Value is invocable and has a non-empty name
    Named(String),
    /// Not invocable, unnamed, or the name could not be read
    Fallback,
}

impl NameLookup {
    /// Name to display, `<anonymous>` for the fallback
    pub fn into_label(self) -> String {
        match self {
            NameLookup::Named(name) => name,
            NameLookup::Fallback => ANONYMOUS_FUNCTION.to_string(),
        }
    }
}

/// Look up the name of `value`; `None` stands for a non-invocable value
///
/// **Public** - result-typed form of `function_name`
pub fn lookup_function_name(value: Option<&dyn Invocable>) -> NameLookup {
    let Some(invocable) = value else {
        return NameLookup::Fallback;
    };

    match invocable.declared_name() {
        Ok(name) if !name.is_empty() => NameLookup::Named(name.into_owned()),
        Ok(_) => NameLookup::Fallback,
        Err(e) => {
            trace!("Function name unavailable: {}", e);
            NameLookup::Fallback
        }
    }
}

/// Human-readable label for `value`, never failing
///
/// **Public** - main entry point for name extraction
pub fn function_name(value: Option<&dyn Invocable>) -> String {
    lookup_function_name(value).into_label()
}

/// A callable paired with an explicit name
///
/// **Public** - adapts closures and fn items to `Invocable`; derefs to the
/// wrapped callable so it can still be called directly
pub struct NamedFn<F> {
    name: String,
    func: F,
}

impl<F> NamedFn<F> {
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    /// Name the callable after its Rust path (`<anonymous>` for closures)
    pub fn from_fn(func: F) -> Self {
        Self {
            name: rust_fn_name(&func),
            func,
        }
    }
}

impl<F> Deref for NamedFn<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.func
    }
}

impl<F> Invocable for NamedFn<F> {
    fn declared_name(&self) -> Result<Cow<'_, str>, NameAccessError> {
        Ok(Cow::Borrowed(&self.name))
    }
}

/// Name of a Rust function or closure derived from its type path
///
/// `my_crate::handlers::on_error` becomes `on_error`; closures have no
/// declared name and yield `<anonymous>`.
pub fn rust_fn_name<F>(_func: &F) -> String {
    type_path_name(std::any::type_name::<F>())
        .unwrap_or(ANONYMOUS_FUNCTION)
        .to_string()
}

fn type_path_name(path: &str) -> Option<&str> {
    if path.contains("{{closure}}") {
        return None;
    }

    // Drop generic arguments before taking the last segment
    let path = path.split('<').next().unwrap_or(path);
    path.rsplit("::").next().filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sandboxed;

    impl Invocable for Sandboxed {
        fn declared_name(&self) -> Result<Cow<'_, str>, NameAccessError> {
            Err(NameAccessError::Denied("permission denied".to_string()))
        }
    }

    fn bar() {}

    #[test]
    fn test_non_invocable() {
        assert_eq!(function_name(None), "<anonymous>");
        assert_eq!(lookup_function_name(None), NameLookup::Fallback);
    }

    #[test]
    fn test_named() {
        let named = NamedFn::new("bar", bar);
        assert_eq!(function_name(Some(&named)), "bar");
    }

    #[test]
    fn test_named_fn_stays_callable() {
        let named = NamedFn::new("answer", |x: i32| x * 2);
        assert_eq!((*named)(21), 42);
    }

    #[test]
    fn test_from_fn_uses_type_path() {
        assert_eq!(function_name(Some(&NamedFn::from_fn(bar))), "bar");
        assert_eq!(function_name(Some(&NamedFn::from_fn(|| ()))), "<anonymous>");
    }

    #[test]
    fn test_empty_name() {
        let named = NamedFn::new("", || ());
        assert_eq!(function_name(Some(&named)), "<anonymous>");
    }

    #[test]
    fn test_access_failure() {
        assert_eq!(function_name(Some(&Sandboxed)), "<anonymous>");
    }

    #[test]
    fn test_rust_fn_name() {
        assert_eq!(rust_fn_name(&bar), "bar");
        assert_eq!(rust_fn_name(&|| 1), "<anonymous>");
    }
}
