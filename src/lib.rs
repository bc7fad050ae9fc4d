//! Aspen - Template Engine
//!
//! A minimal template engine with named blocks and single level
//! template inheritance.
//!
//! Expressions render values from a [`Store`]:
//!
//! ```
//! use aspen::Store;
//!
//! let engine = aspen::default();
//! let template = engine.compile_must("hello, {{ name }}!");
//! let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
//!
//! assert_eq!(result.unwrap(), "hello, taylor!");
//! ```
//!
//! Templates may inherit from one another. A child template names its
//! parent with an `extends` tag, and replaces the named blocks of the
//! parent by declaring blocks of its own. The parent source is located
//! by a [`Resolver`]:
//!
//! ```
//! use aspen::Store;
//!
//! let engine = aspen::default().with_resolver(|name: &str| {
//!     (name == "letter").then(|| {
//!         "{% block greeting %}Hello{% endblock %}, {{ name }}.".to_string()
//!     })
//! });
//!
//! let child = engine
//!     .compile("{% extends letter %}{% block greeting %}Goodbye{% endblock %}")
//!     .unwrap();
//! let result = engine.render(&child, &Store::new().with_must("name", "taylor"));
//!
//! assert_eq!(result.unwrap(), "Goodbye, taylor.");
//! ```
//!
//! The default markers can be swapped out with a [`Builder`]:
//!
//! ```
//! use aspen::{Builder, Engine, Store};
//!
//! let engine = Engine::new(Builder::new().with_expression("<<", ">>").to_syntax());
//! let template = engine.compile_must("<< name >>");
//! let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
//!
//! assert_eq!(result.unwrap(), "taylor");
//! ```
mod compile;
mod engine;
mod log;
mod pipe;
mod region;
mod render;
mod resolve;
mod store;

pub use compile::{compile, token, tree, Builder, Keyword, Marker, Parser, Scope, Template};
pub use engine::Engine;
pub use log::{Error, Pointer};
pub use region::Region;
pub use render::{render, Renderer};
pub use resolve::Resolver;
pub use store::{Overrides, Store};

/// Create a new [`Engine`] with the default markers.
#[inline]
pub fn default() -> Engine {
    Engine::default()
}
