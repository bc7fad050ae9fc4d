use crate::{compile::Scope, resolve::Resolver};
use std::{
    fmt::{Debug, Formatter, Result},
    sync::Arc,
};

/// The Abstract Syntax Tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Raw text.
    Raw(String),
    /// Render a variable.
    Output(Identifier),
    /// A named region that may be replaced during inheritance.
    Block(Block),
    /// Inherit from another template.
    Extends(Extends),
}

/// Name of a value within the Store.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    /// The literal name.
    pub name: String,
}

/// A named [`Scope`].
///
/// When a child template extends a parent, the child's top level blocks
/// replace the parent blocks with the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// The name of the block, used to match it with an override.
    pub name: String,
    /// The contents rendered when no override is found.
    pub scope: Scope,
}

impl Block {
    /// Create a new Block with the given name and contents.
    #[inline]
    pub fn new<T>(name: T, scope: Scope) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            scope,
        }
    }
}

/// Marks a template as inheriting from another template.
///
/// Retains the [`Resolver`] that was available at compile time, so the
/// parent source can be loaded when the template is rendered.
#[derive(Clone)]
pub struct Extends {
    /// The name of the parent template.
    pub name: String,
    /// Capability used to load the parent source at render time.
    pub(crate) resolver: Arc<dyn Resolver>,
}

impl Extends {
    /// Create a new Extends with the given parent name and [`Resolver`].
    pub fn new<T, R>(name: T, resolver: R) -> Self
    where
        T: Into<String>,
        R: Resolver + 'static,
    {
        Self {
            name: name.into(),
            resolver: Arc::new(resolver),
        }
    }

    /// Create a new Extends sharing an existing [`Resolver`] handle.
    pub(crate) fn shared<T>(name: T, resolver: Arc<dyn Resolver>) -> Self
    where
        T: Into<String>,
    {
        Self {
            name: name.into(),
            resolver,
        }
    }
}

impl Debug for Extends {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Extends")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Extends {
    /// Compares the parent names.
    ///
    /// The resolver is behavior rather than data, so it has no part
    /// in equality.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::Extends;

    #[test]
    fn test_extends_eq_ignores_resolver() {
        let left = Extends::new("base.html", |_: &str| -> Option<String> { None });
        let right = Extends::new("base.html", |name: &str| Some(name.to_string()));

        assert_eq!(left, right);
        assert_ne!(
            left,
            Extends::new("other.html", |_: &str| -> Option<String> { None })
        );
    }

    #[test]
    fn test_extends_debug_elides_resolver() {
        let extends = Extends::new("base.html", |_: &str| -> Option<String> { None });
        let debug = format!("{:?}", extends);

        assert!(debug.contains("base.html"));
        assert!(!debug.contains("resolver"));
    }
}
