use crate::{compile::Keyword, Marker};
use std::fmt::Display;

/// Types emitted by the Lexer.
///
/// An abstraction over raw text to make construction of Tree types easier.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Token {
    /// Raw text.
    Raw,
    /// String literal within a tag.
    String,
    /// Identifier (unquoted string) within a tag.
    Identifier,
    /// Whitespace within a tag.
    Whitespace,
    /// Beginning of an expression - {{ by default.
    BeginExpression,
    /// End of an expression - }} by default.
    EndExpression,
    /// Beginning of a tag - {% by default.
    BeginTag,
    /// End of a tag - %} by default.
    EndTag,
    /// .
    Period,
    /// A recognized "special" keyword that begins a certain type of tag.
    Keyword(Keyword),
}

impl Token {
    /// Convert a Marker into a Token.
    ///
    /// Return value includes the resulting Token and a boolean which indicates
    /// if the Token is whitespace trimmed.
    pub(crate) fn from_usize_trim(id: usize) -> (Self, bool) {
        match Marker::from(id) {
            Marker::BeginExpression => (Self::BeginExpression, false),
            Marker::EndExpression => (Self::EndExpression, false),
            Marker::BeginExpressionTrim => (Self::BeginExpression, true),
            Marker::EndExpressionTrim => (Self::EndExpression, true),
            Marker::BeginTag => (Self::BeginTag, false),
            Marker::EndTag => (Self::EndTag, false),
            Marker::BeginTagTrim => (Self::BeginTag, true),
            Marker::EndTagTrim => (Self::EndTag, true),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Raw => write!(f, "raw"),
            Token::String => write!(f, "string"),
            Token::Identifier => write!(f, "identifier"),
            Token::Whitespace => write!(f, "whitespace"),
            Token::BeginExpression => write!(f, "begin expression"),
            Token::EndExpression => write!(f, "end expression"),
            Token::BeginTag => write!(f, "begin tag"),
            Token::EndTag => write!(f, "end tag"),
            Token::Period => write!(f, "period (.)"),
            Token::Keyword(keyword) => write!(f, "keyword {keyword}"),
        }
    }
}
