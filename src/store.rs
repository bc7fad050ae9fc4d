use crate::{compile::tree::Block, log::Error};
use serde::Serialize;
use serde_json::{to_value, Value};
use std::{collections::HashMap, fmt::Display};

/// Provides storage for data that templates can be rendered against.
pub struct Store {
    data: HashMap<String, Value>,
}

impl Store {
    /// Create a new Store.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Insert the value into the Store.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn insert<S, T>(&mut self, key: S, value: T) -> Result<(), Error>
    where
        S: Into<String>,
        T: Serialize + Display,
    {
        let serialized = to_value(&value)
            .map_err(|_| Error::build(format!("value `{value}` is unserializable")))?;
        self.data.insert(key.into(), serialized);

        Ok(())
    }

    /// Insert the value into the Store.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn insert_must<S, T>(&mut self, key: S, value: T)
    where
        S: Into<String>,
        T: Serialize + Display,
    {
        self.data.insert(key.into(), to_value(value).unwrap());
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Errors
    ///
    /// Returns an error if the serialization fails.
    pub fn with<S, T>(mut self, key: S, value: T) -> Result<Self, Error>
    where
        S: Into<String>,
        T: Serialize + Display,
    {
        self.insert(key, value)?;
        Ok(self)
    }

    /// Insert the value into the Store.
    ///
    /// Returns the Store, so additional methods may be chained.
    ///
    /// # Panics
    ///
    /// Will panic if the serialization fails.
    #[inline]
    pub fn with_must<S, T>(mut self, key: S, value: T) -> Self
    where
        S: Into<String>,
        T: Serialize + Display,
    {
        self.insert_must(key, value);
        self
    }

    /// Get the value of the given key, if any.
    #[inline]
    pub fn get(&self, index: &str) -> Option<&Value> {
        self.data.get(index)
    }
}

/// Provides storage for [`Block`] instances that render in place of
/// blocks with matching names.
///
/// During inheritance the top level blocks of a child template are
/// collected into an Overrides before the parent is rendered. One may
/// also be built by hand and passed to a `Renderer` to replace blocks
/// without writing a child template.
#[derive(Debug, Clone, PartialEq)]
pub struct Overrides {
    pub(crate) data: HashMap<String, Block>,
}

impl Overrides {
    /// Create a new Overrides.
    #[inline]
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Insert the block, keyed by its own name.
    ///
    /// Replaces any previously inserted block with the same name.
    #[inline]
    pub fn insert(&mut self, block: Block) {
        self.data.insert(block.name.clone(), block);
    }

    /// Insert the block, keyed by its own name.
    ///
    /// Returns the Overrides, so additional methods may be chained.
    #[inline]
    pub fn with(mut self, block: Block) -> Self {
        self.insert(block);
        self
    }

    /// Get the block with the given name, if any.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Block> {
        self.data.get(name)
    }
}
