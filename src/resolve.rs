//! Contains the [`Resolver`] trait used to locate parent templates.
//!
//! A template inherits from a parent by naming it with an `extends` tag:
//!
//! ```html
//! {% extends base %}
//!
//! {% block title %}A custom title.{% endblock %}
//! ```
//!
//! The engine does not store templates, so the name `base` means nothing
//! to it on its own. A `Resolver` maps that name to template source text,
//! and may be backed by anything: a map kept in memory, the file system,
//! an embedded archive.
//!
//! Resolution is deferred. Compiling the child does not touch the resolver,
//! and each render of the child loads and compiles the parent again. Hosts
//! that want caching can memoize inside their resolver.
//!
//! You can either create a struct and implement the trait on that, or just
//! create a function matching the signature of the `resolve` method:
//!
//! ```
//! use aspen::Store;
//!
//! let engine = aspen::default().with_resolver(|name: &str| {
//!     (name == "base").then(|| "Hello, {% block name %}world{% endblock %}!".to_string())
//! });
//!
//! let template = engine
//!     .compile("{% extends base %}{% block name %}{{ user }}{% endblock %}")
//!     .unwrap();
//! let result = engine.render(&template, &Store::new().with_must("user", "Piper"));
//!
//! assert_eq!(result.unwrap(), "Hello, Piper!");
//! ```

/// Describes a type that can return template source text by name.
pub trait Resolver: Sync + Send {
    /// Return the source text of the template with the given name,
    /// or None when no template by that name exists.
    fn resolve(&self, name: &str) -> Option<String>;
}

/// Allows assignment of any function matching the signature of `resolve`
/// as a `Resolver` to `Engine`, instead of requiring a struct be created.
impl<F> Resolver for F
where
    F: Fn(&str) -> Option<String> + Sync + Send,
{
    fn resolve(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// A [`Resolver`] that never finds anything.
///
/// Engines begin with this resolver, so rendering a template that extends
/// another fails with a missing template error until a real resolver is set.
pub(crate) fn unresolved(_: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::{unresolved, Resolver};
    use std::collections::HashMap;

    #[test]
    fn test_function_resolver() {
        let resolver = |name: &str| (name == "base").then(|| "hello".to_string());

        assert_eq!(resolver.resolve("base"), Some("hello".to_string()));
        assert_eq!(resolver.resolve("other"), None);
    }

    #[test]
    fn test_closure_over_map() {
        let mut map = HashMap::new();
        map.insert("base".to_string(), "hello".to_string());
        let resolver = move |name: &str| map.get(name).cloned();

        assert_eq!(resolver.resolve("base"), Some("hello".to_string()));
        assert_eq!(resolver.resolve("other"), None);
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(unresolved("anything"), None);
    }
}
