use crate::{
    compile::{
        tree::{Extends, Tree},
        Parser, Scope, Template,
    },
    log::{error_missing_template, error_missing_value, error_write, Error, INVALID_EXTENDS},
    pipe::Pipe,
    Engine, Overrides, Store,
};
use std::fmt::Write;

/// Render a [`Template`].
///
/// Provides a shortcut to quickly render a `Template` when no advanced features
/// are needed.
///
/// You may also prefer to create an [`Engine`][`crate::Engine`] if you intend to
/// use custom delimiters or template inheritance.
///
/// # Errors
///
/// Returns an [`Error`] if rendering fails.
///
/// # Examples
///
/// ```
/// use aspen::{compile, render, Store};
///
/// let template = compile("hello, {{ name }}!");
/// assert!(template.is_ok());
///
/// let output = render(&template.unwrap(), &Store::new().with_must("name", "taylor"));
/// assert_eq!(output.unwrap(), "hello, taylor!");
/// ```
pub fn render(template: &Template, store: &Store) -> Result<String, Error> {
    Renderer::new(&Engine::default(), template, store).render()
}

pub struct Renderer<'source, 'store> {
    /// An engine containing the active syntax and resolver.
    engine: &'source Engine,
    /// The template being rendered.
    template: &'source Template,
    /// The Store that the Template is rendered with.
    store: &'store Store,
    /// Blocks that render in place of blocks with matching names.
    overrides: Overrides,
}

impl<'source, 'store> Renderer<'source, 'store> {
    /// Create a new Renderer.
    pub fn new(engine: &'source Engine, template: &'source Template, store: &'store Store) -> Self {
        Renderer {
            engine,
            template,
            store,
            overrides: Overrides::new(),
        }
    }

    /// Set the [`Overrides`] of the Renderer.
    ///
    /// Returns the Renderer, so additional methods may be chained.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Render the Template stored inside the Renderer.
    ///
    /// When the template extends another, rendering is delegated to the
    /// parent, with the top level blocks of this template laid over the
    /// blocks of the parent.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when an expression names a value missing from
    /// the [`Store`], when a parent template cannot be resolved or compiled,
    /// or when a write to the buffer fails.
    pub fn render(&self) -> Result<String, Error> {
        match self.template.get_extends() {
            Some(extends) => self.render_extends(extends),
            None => {
                let mut buffer = String::new();
                let mut pipe = Pipe::new(&mut buffer);
                self.render_scope(self.template.get_scope(), &self.overrides, &mut pipe)?;

                Ok(buffer)
            }
        }
    }

    /// Render the parent named by the given [`Extends`].
    ///
    /// The top level blocks of the child become overrides for the parent,
    /// and everything else in the child is discarded. Blocks given to the
    /// Renderer directly win over blocks collected from the child.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the parent cannot be resolved or compiled,
    /// or extends another template itself.
    fn render_extends(&self, extends: &Extends) -> Result<String, Error> {
        let name = extends.name.as_str();
        let source = extends
            .resolver
            .resolve(name)
            .ok_or_else(|| error_missing_template(name))?;

        let parent = Parser::new(&source, self.engine.get_finder(), extends.resolver.clone())
            .compile(Some(name))
            .map_err(|error| error.with_name(name))?;
        if parent.get_extends().is_some() {
            return Err(Error::build(INVALID_EXTENDS)
                .with_name(name)
                .with_help(format!(
                    "template `{name}` extends another template, \
                    inheritance is limited to one level"
                )));
        }

        let mut merged = Overrides::new();
        for tree in &self.template.get_scope().data {
            if let Tree::Block(block) = tree {
                merged.insert(block.clone());
            }
        }
        for block in self.overrides.data.values() {
            merged.insert(block.clone());
        }

        let mut buffer = String::with_capacity(source.len());
        let mut pipe = Pipe::new(&mut buffer);
        self.render_scope(parent.get_scope(), &merged, &mut pipe)?;

        Ok(buffer)
    }

    /// Render a [`Scope`].
    ///
    /// Blocks with an entry in the given [`Overrides`] render the override
    /// in place of their own contents.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if any of the Tree instances within the Scope
    /// cannot be rendered.
    fn render_scope(
        &self,
        scope: &Scope,
        overrides: &Overrides,
        pipe: &mut Pipe,
    ) -> Result<(), Error> {
        for tree in &scope.data {
            match tree {
                Tree::Raw(raw) => pipe.write_str(raw).map_err(|_| error_write())?,
                Tree::Output(identifier) => {
                    let value = self
                        .store
                        .get(&identifier.name)
                        .ok_or_else(|| error_missing_value(&identifier.name))?;

                    pipe.write_value(value).map_err(|_| error_write())?
                }
                Tree::Block(block) => {
                    let scope = overrides
                        .get(&block.name)
                        .map(|over| &over.scope)
                        .unwrap_or(&block.scope);

                    self.render_scope(scope, overrides, pipe)?
                }
                Tree::Extends(extends) => {
                    return Err(Error::build(INVALID_EXTENDS).with_help(format!(
                        "`extends {}` must appear at the top level of the template",
                        extends.name
                    )))
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::{
        compile::{
            tree::{Block, Tree},
            Builder, Scope,
        },
        log::{error_missing_template, error_missing_value, Error, INVALID_EXTENDS},
        Engine, Overrides, Renderer, Store,
    };

    #[test]
    fn test_render_raw() {
        let template = crate::compile::compile("hello there").unwrap();

        assert_eq!(render(&template, &Store::new()).unwrap(), "hello there");
    }

    #[test]
    fn test_render_empty() {
        let template = crate::compile::compile("").unwrap();

        assert_eq!(render(&template, &Store::new()).unwrap(), "");
    }

    #[test]
    fn test_render_output() {
        let engine = Engine::default();
        let template = engine.compile_must("hello there, {{ name }}!");
        let result = engine.render(&template, &Store::new().with_must("name", "taylor"));

        assert_eq!(result.unwrap(), "hello there, taylor!");
    }

    #[test]
    fn test_render_bool() {
        let engine = Engine::default();
        let template = engine.compile_must("{{ is_admin }}");
        let result = engine.render(&template, &Store::new().with_must("is_admin", true));

        assert_eq!(result.unwrap(), "true");
    }

    #[test]
    fn test_render_dotted_key() {
        let engine = Engine::default();
        let template = engine.compile_must("{{ account.name }}");
        let result = engine.render(&template, &Store::new().with_must("account.name", "piper"));

        assert_eq!(result.unwrap(), "piper");
    }

    #[test]
    fn test_render_missing_value() {
        let engine = Engine::default();
        let template = engine.compile_must("{{ name }}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(result.unwrap_err(), error_missing_value("name"));
    }

    #[test]
    fn test_render_block_fallback() {
        let engine = Engine::default();
        let template = engine.compile_must("a {% block title %}default{% endblock %} b");
        let result = engine.render(&template, &Store::new());

        assert_eq!(result.unwrap(), "a default b");
    }

    #[test]
    fn test_render_block_override() {
        let engine = Engine::default();
        let template = engine.compile_must("a {% block title %}default{% endblock %} b");
        let overrides = Overrides::new().with(Block::new(
            "title",
            Scope::from(vec![Tree::Raw("replaced".into())]),
        ));
        let result = Renderer::new(&engine, &template, &Store::new())
            .with_overrides(overrides)
            .render();

        assert_eq!(result.unwrap(), "a replaced b");
    }

    #[test]
    fn test_render_extends() {
        let engine = helper_engine();
        let template = engine.compile_must(
            "{% extends base %}text before \
            {% block title %}child title{% endblock %} text after",
        );
        let result = engine.render(&template, &Store::new());

        assert_eq!(
            result.unwrap(),
            "This is the start of base child title after base block"
        );
    }

    #[test]
    fn test_render_extends_keeps_parent_blocks() {
        let engine = helper_engine();
        let template = engine.compile_must("{% extends base %}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(
            result.unwrap(),
            "This is the start of base base title after base block"
        );
    }

    #[test]
    fn test_render_extends_repeatable() {
        let engine = helper_engine();
        let template = engine.compile_must(
            "{% extends base %}{% block title %}one{% endblock %}",
        );

        assert_eq!(
            engine.render(&template, &Store::new()).unwrap(),
            engine.render(&template, &Store::new()).unwrap(),
        );
    }

    #[test]
    fn test_render_extends_store() {
        let engine = Engine::default().with_resolver(|name: &str| {
            (name == "base").then(|| "Hello, {% block name %}world{% endblock %}!".to_string())
        });
        let template = engine
            .compile("{% extends base %}{% block name %}{{ user }}{% endblock %}")
            .unwrap();
        let result = engine.render(&template, &Store::new().with_must("user", "taylor"));

        assert_eq!(result.unwrap(), "Hello, taylor!");
    }

    #[test]
    fn test_render_overrides_beat_child_blocks() {
        let engine = helper_engine();
        let template = engine.compile_must(
            "{% extends base %}{% block title %}from child{% endblock %}",
        );
        let overrides = Overrides::new().with(Block::new(
            "title",
            Scope::from(vec![Tree::Raw("from caller".into())]),
        ));
        let result = Renderer::new(&engine, &template, &Store::new())
            .with_overrides(overrides)
            .render();

        assert_eq!(
            result.unwrap(),
            "This is the start of base from caller after base block"
        );
    }

    #[test]
    fn test_render_missing_parent() {
        let engine = Engine::default();
        let template = engine.compile_must("{% extends ghost %}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(result.unwrap_err(), error_missing_template("ghost"));
    }

    #[test]
    fn test_render_transitive_extends() {
        let engine = Engine::default().with_resolver(|name: &str| match name {
            "middle" => Some("{% extends top %}".to_string()),
            "top" => Some("top text".to_string()),
            _ => None,
        });
        let template = engine.compile_must("{% extends middle %}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(
            result.unwrap_err(),
            Error::build(INVALID_EXTENDS).with_name("middle").with_help(
                "template `middle` extends another template, \
                inheritance is limited to one level"
            )
        );
    }

    #[test]
    fn test_render_extends_in_block() {
        let engine = helper_engine();
        let template =
            engine.compile_must("{% block a %}{% extends base %}{% endblock %}");
        let result = engine.render(&template, &Store::new());

        assert_eq!(
            result.unwrap_err(),
            Error::build(INVALID_EXTENDS)
                .with_help("`extends base` must appear at the top level of the template")
        );
    }

    #[test]
    fn test_render_trim_markers() {
        let engine = Engine::default();
        let template = engine.compile_must("a   {{- item -}}   b");
        let result = engine.render(&template, &Store::new().with_must("item", "X"));

        assert_eq!(result.unwrap(), "aXb");
    }

    #[test]
    fn test_render_custom_syntax() {
        let engine = Engine::new(Builder::new().with_expression("<<", ">>").to_syntax());
        let template = engine.compile_must("number << value >> here");
        let result = engine.render(&template, &Store::new().with_must("value", 100));

        assert_eq!(result.unwrap(), "number 100 here");
    }

    /// Helper function to create an Engine with a resolver that
    /// recognizes the template `base`.
    fn helper_engine() -> Engine {
        Engine::default().with_resolver(|name: &str| {
            (name == "base").then(|| {
                "This is the start of base \
                {% block title %}base title{% endblock %} \
                after base block"
                    .to_string()
            })
        })
    }
}
