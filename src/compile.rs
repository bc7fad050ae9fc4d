//! Compilation of template text.
//!
//! Compiling is done in steps.
//!
//! First, a Lexer reads the source and spits out Token instances paired
//! with Region instances describing where in the source they were found.
//!
//! A Parser repeatedly pulls from the Lexer and assembles the tokens into
//! Tree instances, which wind up stored in a Template.
mod lex;
mod parse;
mod syntax;
mod template;

pub use self::{
    lex::token,
    parse::{scope::Scope, tree, Parser},
    syntax::{Builder, Marker},
    template::Template,
};

use crate::{log::Error, Engine};
use std::fmt::Display;

/// Compile a new [`Template`] from the given text.
///
/// Provides a shortcut to quickly compile a `Template` without creating
/// an [`Engine`].
///
/// Templates that use `extends` should be compiled by an `Engine` carrying
/// a [`Resolver`][`crate::Resolver`] instead, so the parent template can be
/// found at render time.
///
/// # Errors
///
/// Returns an [`Error`] when compilation fails, which most likely means
/// the source contains invalid syntax.
///
/// # Examples
///
/// ```
/// let template = aspen::compile("hello, {{ name }}!");
/// assert!(template.is_ok())
/// ```
pub fn compile(text: &str) -> Result<Template, Error> {
    Engine::default().compile(text)
}

/// Keywords recognized within tags.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Keyword {
    /// Begin a named block.
    Block,
    /// End a named block.
    EndBlock,
    /// Inherit from the named parent template.
    Extends,
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Keyword::Block => write!(f, "block"),
            Keyword::EndBlock => write!(f, "endblock"),
            Keyword::Extends => write!(f, "extends"),
        }
    }
}
