use crate::compile::{
    tree::{Extends, Tree},
    Scope,
};

/// A compiled template, ready to be rendered with some Store data.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    /// The Abstract Syntax Tree generated during compilation.
    scope: Scope,
    /// The name of the Template, if one was given during compilation.
    name: Option<String>,
}

impl Template {
    /// Create a new Template.
    #[inline]
    pub(crate) fn new(scope: Scope, name: Option<String>) -> Self {
        Self { scope, name }
    }

    /// Return the name of the Template.
    #[inline]
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Return a reference to the Scope owned by the Template.
    #[inline]
    pub(crate) fn get_scope(&self) -> &Scope {
        &self.scope
    }

    /// Return the first top level [`Extends`] in the Template.
    ///
    /// A template carrying an extends node is a child template, and
    /// rendering it is delegated to the named parent.
    pub(crate) fn get_extends(&self) -> Option<&Extends> {
        self.scope.data.iter().find_map(|tree| match tree {
            Tree::Extends(extends) => Some(extends),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_extends() {
        let child = crate::compile::compile("{% extends base %}rest").unwrap();
        assert!(child.get_extends().is_some_and(|e| e.name == "base"));

        let plain = crate::compile::compile("no parent here").unwrap();
        assert!(plain.get_extends().is_none());
    }

    #[test]
    fn test_get_name() {
        let template = crate::Engine::default()
            .compile_named("index.html", "hello")
            .unwrap();
        assert_eq!(template.get_name(), Some("index.html"));
    }
}
