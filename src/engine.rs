use crate::{
    compile::{Builder, Parser, Template},
    log::Error,
    render::Renderer,
    resolve::unresolved,
    Overrides, Resolver, Store,
};
use morel::{Finder, Syntax};
use std::sync::Arc;

/// Facilitates compiling and rendering templates.
///
/// Owns the [`Syntax`] used to recognize markers in template source,
/// and the [`Resolver`] used to locate parent templates named by
/// `extends` tags.
pub struct Engine {
    /// Compiled marker search used by lexers.
    finder: Finder,
    /// Capability used to locate parent templates.
    resolver: Arc<dyn Resolver>,
}

impl Engine {
    /// Create a new instance of [`Engine`] with the given `Syntax`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::{Builder, Engine};
    ///
    /// let engine = Engine::new(
    ///     Builder::new()
    ///         .with_expression("((", "))")
    ///         .with_tag("(*", "*)")
    ///         .to_syntax(),
    /// );
    /// let template = engine.compile("hello, (( name ))!");
    /// assert!(template.is_ok());
    /// ```
    #[inline]
    pub fn new(syntax: Syntax) -> Self {
        Self {
            finder: Finder::new(syntax),
            resolver: Arc::new(unresolved),
        }
    }

    /// Set the [`Resolver`] used to locate parent templates.
    pub fn set_resolver<T>(&mut self, resolver: T)
    where
        T: Resolver + 'static,
    {
        self.resolver = Arc::new(resolver);
    }

    /// Set the [`Resolver`] used to locate parent templates.
    ///
    /// Returns the Engine, so additional methods may be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// let engine = aspen::default()
    ///     .with_resolver(|name: &str| (name == "base").then(|| "base text".to_string()));
    /// ```
    pub fn with_resolver<T>(mut self, resolver: T) -> Self
    where
        T: Resolver + 'static,
    {
        self.set_resolver(resolver);
        self
    }

    /// Compile a new [`Template`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails, which most likely means the source
    /// contains invalid syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Engine;
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("hello, {{ name }}!");
    /// assert!(template.is_ok());
    /// ```
    #[inline]
    pub fn compile(&self, text: &str) -> Result<Template, Error> {
        Parser::new(text, &self.finder, self.resolver.clone()).compile(None)
    }

    /// Compile a new [`Template`] with the given name.
    ///
    /// The name is attached to the Template and to any [`Error`], which makes
    /// the origin of a failure easier to see when rendering involves more than
    /// one template.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails, which most likely means the source
    /// contains invalid syntax.
    pub fn compile_named(&self, name: &str, text: &str) -> Result<Template, Error> {
        Parser::new(text, &self.finder, self.resolver.clone())
            .compile(Some(name))
            .map_err(|error| error.with_name(name))
    }

    /// Compile a new [`Template`].
    ///
    /// # Panics
    ///
    /// Panics when compilation fails, which most likely means the source
    /// contains invalid syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Engine;
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile_must("hello, {{ name }}!");
    /// ```
    #[inline]
    pub fn compile_must(&self, text: &str) -> Template {
        self.compile(text).unwrap()
    }

    /// Render a [`Template`] with the given [`Store`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if rendering fails, which may happen when the template
    /// names a value missing from the `Store`, or when a parent template cannot
    /// be resolved.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::{Engine, Store};
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile_must("hello, {{ name }}!");
    /// let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!")
    /// ```
    #[inline]
    pub fn render(&self, template: &Template, store: &Store) -> Result<String, Error> {
        Renderer::new(self, template, store).render()
    }

    /// Render a [`Template`] with the given [`Store`] and [`Overrides`].
    ///
    /// Blocks in the Overrides render in place of blocks in the template
    /// with matching names.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if rendering fails.
    #[inline]
    pub fn render_with(
        &self,
        template: &Template,
        store: &Store,
        overrides: Overrides,
    ) -> Result<String, Error> {
        Renderer::new(self, template, store)
            .with_overrides(overrides)
            .render()
    }

    /// Return a reference to the [`Finder`] owned by the Engine.
    #[inline]
    pub(crate) fn get_finder(&self) -> &Finder {
        &self.finder
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Builder::new().to_syntax())
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::{
        compile::{tree::Block, Builder, Scope},
        Overrides, Store,
    };
    use std::collections::HashMap;

    #[test]
    fn test_compile_named_error() {
        let engine = Engine::default();
        let result = engine.compile_named("bad.html", "{{ oops");

        assert_eq!(result.unwrap_err().get_name(), Some("bad.html"));
    }

    #[test]
    fn test_custom_tag_syntax() {
        let engine = Engine::new(
            Builder::new()
                .with_expression("((", "))")
                .with_tag("(*", "*)")
                .to_syntax(),
        );
        let template = engine.compile_must("(* block note *)text(* endblock *)");
        let result = engine.render(&template, &Store::new());

        assert_eq!(result.unwrap(), "text");
    }

    #[test]
    fn test_map_resolver() {
        let mut sources = HashMap::new();
        sources.insert(
            "base".to_string(),
            "{% block body %}fallback{% endblock %}".to_string(),
        );

        let engine = Engine::default().with_resolver(move |name: &str| sources.get(name).cloned());
        let template = engine.compile_must("{% extends base %}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(result.unwrap(), "fallback");
    }

    #[test]
    fn test_render_with_overrides() {
        let engine = Engine::default();
        let template = engine.compile_must("{% block note %}old{% endblock %}");
        let overrides = Overrides::new().with(Block::new(
            "note",
            Scope::from(vec![crate::compile::tree::Tree::Raw("new".into())]),
        ));
        let result = engine.render_with(&template, &Store::new(), overrides);

        assert_eq!(result.unwrap(), "new");
    }
}
