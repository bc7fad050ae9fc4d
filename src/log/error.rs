use super::{Pointer, RED, RESET};
use crate::region::Region;
use std::fmt::{Debug, Display, Formatter, Result};

/// Describes an error, and allows adding a contextual help text and a
/// visualization pointing into the source.
///
/// # Examples
///
/// Creating an [`Error`] that includes a [`Pointer`]:
///
/// ```
/// use aspen::{Error, Region};
///
/// Error::build("unexpected keyword")
///     .with_pointer("{% update name %}", Region::new(3..9))
///     .with_name("template.txt")
///     .with_help("expected `block`, `endblock`, or `extends`");
/// ```
///
/// When printed with `println!("{:#}", error)` the [`Error`] produces this output:
///
/// ```text
/// error: unexpected keyword
///   --> template.txt:1:4
///    |
///  1 | {% update name %}
///    |    ^^^^^^
///    |
///   = help: expected `block`, `endblock`, or `extends`
/// ```
pub struct Error {
    /// Describes the cause of the [`Error`].
    reason: String,
    /// A visualization pointing to the origin of the [`Error`].
    pointer: Option<Pointer>,
    /// Additional information to display with the [`Error`].
    help: Option<String>,
    /// The name of the Template that the [`Error`] comes from.
    name: Option<String>,
}

impl Error {
    /// Create a new [`Error`] with the given reason text.
    ///
    /// The additional fields may be populated using the various methods
    /// defined on `Error`.
    ///
    /// # Examples
    ///
    /// ```
    /// use aspen::Error;
    ///
    /// Error::build("unexpected keyword")
    ///     .with_help("expected `block`, `endblock`, or `extends`");
    /// ```
    pub fn build<T>(reason: T) -> Self
    where
        T: Into<String>,
    {
        Error {
            reason: reason.into(),
            name: None,
            pointer: None,
            help: None,
        }
    }

    /// Set the reason text, which is a short summary of the [`Error`].
    pub fn with_reason<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.reason = text.into();

        self
    }

    /// Set the name text, which is the name of the [`Template`][`crate::Template`]
    /// that the [`Error`] is related to.
    pub fn with_name<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.name = Some(text.into());

        self
    }

    /// Set the visualization to a new [`Pointer`] over the given source text
    /// and [`Region`].
    pub fn with_pointer<T>(mut self, source: &str, region: T) -> Self
    where
        T: Into<Region>,
    {
        self.pointer = Some(Pointer::new(source, region.into()));

        self
    }

    /// Set the help text, which is contextual information to accompany the
    /// reason text.
    pub fn with_help<T>(mut self, text: T) -> Self
    where
        T: Into<String>,
    {
        self.help = Some(text.into());

        self
    }

    /// Return the name of the `Template` that the error is related to.
    pub fn get_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if !f.alternate() {
            writeln!(f, "{self:#}")?;
        }
        f.debug_struct("Error")
            .field("reason", &self.reason)
            .field("name", &self.name)
            .field("pointer", &self.pointer)
            .field("help", &self.help)
            .finish()?;

        Ok(())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let header = format!("{RED}error{RESET}");
        write!(f, "{header}: {}", self.reason)?;

        if f.alternate() {
            if let Some(pointer) = &self.pointer {
                return pointer.display(f, self.name.as_deref(), self.help.as_deref());
            }
            if let Some(help) = &self.help {
                write!(f, "\n = help: {help}")?;
            }
        }

        Ok(())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.reason == other.reason && self.help == other.help && self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_get_name() {
        let error = Error::build("unexpected token").with_name("layout.html");

        assert_eq!(error.get_name(), Some("layout.html"));
    }

    #[test]
    fn test_eq_ignores_pointer() {
        let bare = Error::build("unexpected token").with_help("close the expression");
        let pointed = Error::build("unexpected token")
            .with_help("close the expression")
            .with_pointer("{{ name", 3..7);

        assert_eq!(bare, pointed);
    }

    #[test]
    fn test_display_plain() {
        let error = Error::build("missing value").with_help("add it to the store");

        assert!(format!("{error}").ends_with("missing value"));
    }
}
