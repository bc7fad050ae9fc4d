pub mod token;

mod state;

use self::{state::CursorState, token::Token};
use crate::{
    compile::Keyword,
    log::{Error, INVALID_SYNTAX, UNEXPECTED_TOKEN},
    region::Region,
};
use morel::Finder;

pub(crate) type LexResult = Result<Option<(Token, Region)>, Error>;
pub(crate) type LexResultMust = Result<(Token, Region), Error>;

/// Provides methods to read a source string as [`Token`] instances.
pub struct Lexer<'source> {
    /// Reference to the source text.
    pub source: &'source str,
    /// Position within source.
    pub cursor: usize,
    /// Compiled [`Finder`] instance used to search for markers
    /// in the source text.
    finder: &'source Finder,
    /// Tracks the [`Lexer`] state and determines the action taken
    /// when `.next` is called.
    state: CursorState,
    /// When true, the following [`Token`] read while in
    /// [`CursorState::Default`] state will be left trimmed.
    left_trim: bool,
    /// Temporary storage for a [`Token`] that will be read
    /// on the following call to `.next`.
    buffer: Option<(Token, Region)>,
}

impl<'source> Lexer<'source> {
    /// Create a new [`Lexer`] from the given source and [`Finder`].
    #[inline]
    pub fn new(source: &'source str, finder: &'source Finder) -> Self {
        Self {
            finder,
            state: CursorState::Default,
            source,
            left_trim: false,
            cursor: 0,
            buffer: None,
        }
    }

    /// Return the next [`Token`] and [`Region`].
    ///
    /// Any instance of [`Token::Whitespace`] is ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when an unexpected [`Token`] is found.
    pub fn next(&mut self) -> LexResult {
        loop {
            // Always prefer taking from the buffer when possible.
            if let Some(next) = self.buffer.take() {
                return Ok(Some(next));
            }
            if self.source[self.cursor..].is_empty() {
                return Ok(None);
            }

            let c = self.cursor;
            let result = match self.state {
                CursorState::Default => self.lex_default(c),
                CursorState::Inside { .. } => self.lex_tag(c),
            }?;

            return match result {
                Some((token, region)) => match token {
                    Token::Whitespace => continue,
                    _ => Ok(Some((token, region))),
                },
                None => Ok(None),
            };
        }
    }

    /// Return the next [`Token`] and [`Region`] in [`Inside`][`CursorState::Inside`]
    /// configuration.
    ///
    /// Assumes the cursor is inside of an expression or tag.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when an unexpected [`Token`] is found.
    fn lex_tag(&mut self, from: usize) -> LexResult {
        match self.finder.starts(self.source, from) {
            Some((id, length)) => {
                let (token, is_trimmed) = Token::from_usize_trim(id);

                match self.state {
                    CursorState::Inside { ref end_token } => {
                        if token == *end_token {
                            self.state = CursorState::Default;
                            self.left_trim = is_trimmed;
                            self.cursor = length;

                            Ok(Some((token, (from..length).into())))
                        } else {
                            let which = if *end_token == Token::EndExpression {
                                "expression"
                            } else {
                                "tag"
                            };

                            Err(Error::build(UNEXPECTED_TOKEN)
                                .with_pointer(self.source, from..length)
                                .with_help(format!("did you close the previous {which}?")))
                        }
                    }
                    _ => panic!("lexer must be in tag state"),
                }
            }
            None => {
                let mut advance = |length: usize, data: Token| {
                    self.cursor += length;

                    Ok(Some((data, (from..from + length).into())))
                };

                let mut iterator = self.source[from..]
                    .char_indices()
                    .map(|(d, c)| (from + d, c));
                let (index, char) = iterator.next().unwrap();

                match char {
                    '.' => advance(1, Token::Period),
                    '"' => self.lex_string(iterator, index),
                    c if c.is_whitespace() => Ok(Some(self.lex_whitespace(iterator, index))),
                    c if is_ident_start(c) => Ok(Some(self.lex_ident_or_keyword(iterator, index))),
                    _ => Err(Error::build(UNEXPECTED_TOKEN)
                        .with_pointer(self.source, index..index + char.len_utf8())
                        .with_help(
                            "expected `.`, an identifier, or beginning of a string \
                            literal marked with `\"`",
                        )),
                }
            }
        }
    }

    /// Return a [`Token`] and [`Region`] containing [`Token::Whitespace`].
    fn lex_whitespace<T>(&mut self, mut iter: T, from: usize) -> (Token, Region)
    where
        T: Iterator<Item = (usize, char)>,
    {
        loop {
            match iter.next() {
                Some((index, char)) if !char.is_whitespace() => {
                    self.cursor = index;

                    break (Token::Whitespace, (from..index).into());
                }
                Some((_, _)) => continue,
                None => return (Token::Whitespace, (from..self.source.len()).into()),
            }
        }
    }

    /// Return a [`Token`] and [`Region`] containing [`Token::String`] using
    /// the given iterator.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when an unexpected [`Token`] is found.
    fn lex_string<T>(&mut self, mut iter: T, from: usize) -> LexResult
    where
        T: Iterator<Item = (usize, char)>,
    {
        let mut previous = (from, '"');
        loop {
            match iter.next() {
                Some((index, '"')) if previous.1 != '\\' => {
                    // Accept a double quote as a signal to end the string, unless the previous
                    // character was an escape.
                    //
                    // Add one to the index of the character to comply with string slice
                    // semantics.
                    let to = index + 1;
                    self.cursor = to;

                    return Ok(Some((Token::String, (from..to).into())));
                }
                Some((index, char)) => {
                    // Assign character to "previous" and move on. We use "previous" to
                    // determine if a double quote should be escaped.
                    previous = (index, char);
                }
                None => {
                    // Clamp the pointer to the first few characters.
                    let take = if previous.0 - from > 10 {
                        from + 10
                    } else {
                        previous.0
                    };

                    return Err(Error::build(INVALID_SYNTAX)
                        .with_pointer(self.source, from..take)
                        .with_help(
                            "this might be an undelimited string, try closing it with `\"`",
                        ));
                }
            }
        }
    }

    /// Return a [`Token`] and [`Region`] from the given iterator.
    ///
    /// The `Token` will be [`Token::Identifier`] or [`Token::Keyword`].
    fn lex_ident_or_keyword<T>(&mut self, mut iter: T, from: usize) -> (Token, Region)
    where
        T: Iterator<Item = (usize, char)>,
    {
        let mut check_keyword = |to: usize| {
            let range_text = self
                .source
                .get(from..to)
                .expect("valid range is required to check keyword");

            let token = match range_text {
                "block" => Token::Keyword(Keyword::Block),
                "endblock" => Token::Keyword(Keyword::EndBlock),
                "extends" => Token::Keyword(Keyword::Extends),
                _ => Token::Identifier,
            };
            self.cursor = to;

            (token, (from..to).into())
        };

        loop {
            match iter.next() {
                Some((index, char)) if !is_ident_continue(char) => {
                    break check_keyword(index);
                }
                Some((_, _)) => continue,
                None => break check_keyword(self.source.len()),
            }
        }
    }

    /// Return the next [`Token`] and [`Region`] in [`Default`][`CursorState::Default`]
    /// configuration.
    ///
    /// Assumes the cursor is outside of an expression or tag.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when an unexpected [`Token`] is found.
    fn lex_default(&mut self, from: usize) -> LexResult {
        let mut trim_region = |mut region_begin, mut region_end, right_trim| {
            if right_trim {
                region_end = self.source[..region_end].trim_end().len();
            }
            if self.left_trim {
                self.left_trim = false;
                let s = &self.source[region_begin..region_end];
                region_begin = region_begin + s.len() - s.trim_start().len()
            }

            Ok(Some((Token::Raw, (region_begin..region_end).into())))
        };

        match self.finder.next(self.source, from) {
            Some((id, marker_begin, marker_end)) => {
                let (token, is_trimmed) = Token::from_usize_trim(id);

                match &token {
                    Token::BeginExpression => {
                        self.state = CursorState::Inside {
                            end_token: Token::EndExpression,
                        }
                    }
                    Token::BeginTag => {
                        self.state = CursorState::Inside {
                            end_token: Token::EndTag,
                        }
                    }
                    _ => {
                        return Err(Error::build(UNEXPECTED_TOKEN)
                            .with_pointer(self.source, marker_begin..marker_end)
                            .with_help("expected beginning expression or beginning tag"));
                    }
                }

                if from == marker_begin {
                    self.cursor = marker_end;

                    Ok(Some((token, (marker_begin..marker_end).into())))
                } else {
                    self.cursor = marker_end;
                    self.buffer = Some((token, (marker_begin..marker_end).into()));

                    trim_region(from, marker_begin, is_trimmed)
                }
            }
            None => {
                let remaining = self.cursor..self.source.len();
                self.cursor = self.source.len();

                trim_region(from, remaining.end, false)
            }
        }
    }
}

/// Return true if the given character is a recognized beginning identifier,
/// meaning '_' or an `xid_start`.
fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Return true if the given character is a recognized continue identifier,
/// meaning an `xid_continue`.
fn is_ident_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::Lexer;
    use crate::{
        compile::{
            lex::{state::CursorState, token::Token},
            Keyword,
        },
        log::{Error, INVALID_SYNTAX},
        region::Region,
        Builder,
    };
    use morel::Finder;

    #[test]
    fn test_lex_default_no_match() {
        let expect = vec![(Token::Raw, 0..11)];

        helper_lex_next_auto("lorem ipsum", expect)
    }

    #[test]
    fn test_lex_default_match_no_trim() {
        let expect = vec![
            (Token::Raw, 0..12),
            (Token::BeginExpression, 12..14),
            (Token::Identifier, 15..20),
        ];

        helper_lex_next_auto("lorem ipsum {{ dolor", expect);
    }

    #[test]
    fn test_lex_default_match_trim() {
        let expect = vec![
            (Token::Raw, 0..11),
            (Token::BeginExpression, 12..15),
            (Token::Identifier, 16..21),
        ];

        helper_lex_next_auto("lorem ipsum {{- dolor", expect);
    }

    #[test]
    fn test_lex_state_change() -> Result<(), Error> {
        let finder = Finder::new(Builder::new().to_syntax());
        let mut tag_lexer = Lexer::new("lorem {%", &finder);
        let mut expression_lexer = Lexer::new("lorem {{", &finder);
        tag_lexer.next()?;
        expression_lexer.next()?;

        assert_eq!(
            tag_lexer.state,
            CursorState::Inside {
                end_token: Token::EndTag
            }
        );
        assert_eq!(
            expression_lexer.state,
            CursorState::Inside {
                end_token: Token::EndExpression
            }
        );

        Ok(())
    }

    #[test]
    fn test_lex_ident() {
        let expect = vec![
            (Token::BeginExpression, 0..2),
            (Token::Identifier, 3..8),
            (Token::EndExpression, 9..11),
        ];

        helper_lex_next_auto("{{ hello }}", expect);
    }

    #[test]
    fn test_lex_keyword() {
        let expect = vec![
            (Token::BeginTag, 0..2),
            (Token::Keyword(Keyword::Block), 3..8),
            (Token::EndTag, 9..11),
        ];

        helper_lex_next_auto("{% block %}", expect);
    }

    #[test]
    fn test_lex_period() {
        let expect = vec![
            (Token::BeginExpression, 0..2),
            (Token::Identifier, 3..10),
            (Token::Period, 10..11),
            (Token::Identifier, 11..15),
            (Token::EndExpression, 16..18),
        ];

        helper_lex_next_auto("{{ account.name }}", expect);
    }

    #[test]
    fn test_lex_string() {
        let expect = vec![
            (Token::BeginTag, 0..2),
            (Token::Keyword(Keyword::Extends), 3..10),
            (Token::String, 11..22),
            (Token::EndTag, 23..25),
        ];

        helper_lex_next_auto(r#"{% extends "base.html" %}"#, expect);
    }

    #[test]
    fn test_lex_string_escape() {
        let expect = vec![
            (Token::BeginExpression, 0..2),
            (Token::String, 3..14),
            (Token::EndExpression, 15..17),
        ];

        helper_lex_next_auto(r#"{{ "\"title\"" }}"#, expect);
    }

    #[test]
    fn test_lex_full_document() {
        let source = "<html>\n    <h1>{{ title }}</h1>\n    {% block body %}\n    \
            <p>{{ content }}</p>\n    {% endblock %}\n</html>";
        let expect = vec![
            (Token::Raw, 0..15),
            (Token::BeginExpression, 15..17),
            (Token::Identifier, 18..23),
            (Token::EndExpression, 24..26),
            (Token::Raw, 26..36),
            (Token::BeginTag, 36..38),
            (Token::Keyword(Keyword::Block), 39..44),
            (Token::Identifier, 45..49),
            (Token::EndTag, 50..52),
            (Token::Raw, 52..60),
            (Token::BeginExpression, 60..62),
            (Token::Identifier, 63..70),
            (Token::EndExpression, 71..73),
            (Token::Raw, 73..82),
            (Token::BeginTag, 82..84),
            (Token::Keyword(Keyword::EndBlock), 85..93),
            (Token::EndTag, 94..96),
            (Token::Raw, 96..104),
        ];

        helper_lex_next_auto(source, expect)
    }

    #[test]
    fn test_error_multiple_opening_tags() {
        let expect = vec![
            (Token::Raw, 0..6),
            (Token::BeginExpression, 6..8),
            (Token::Identifier, 9..13),
        ];

        let finder = Finder::new(Builder::new().to_syntax());
        let mut lexer = Lexer::new("hello {{ name {{ }}", &finder);
        for (token, range) in expect {
            assert_eq!(lexer.next(), Ok(Some((token, range.into()))))
        }

        assert!(lexer.next().is_err())
    }

    #[test]
    fn test_error_unrecognized_character() {
        let finder = Finder::new(Builder::new().to_syntax());
        let mut lexer = Lexer::new("{{ name? }}", &finder);
        assert!(lexer.next().is_ok());
        assert!(lexer.next().is_ok());

        assert!(lexer.next().is_err())
    }

    #[test]
    fn test_error_undelimited_string() {
        // The string begins past the pointer clamp width, and runs more
        // than the clamp width before the source ends.
        let finder = Finder::new(Builder::new().to_syntax());
        let mut lexer = Lexer::new(r#"lorem ipsum {{ "abcdefghijklmnop"#, &finder);
        assert_eq!(lexer.next(), Ok(Some((Token::Raw, (0..12).into()))));
        assert_eq!(lexer.next(), Ok(Some((Token::BeginExpression, (12..14).into()))));

        assert_eq!(
            lexer.next(),
            Err(Error::build(INVALID_SYNTAX)
                .with_help("this might be an undelimited string, try closing it with `\"`"))
        );
    }

    /// Helper function which takes in a source string, creates a lexer on that
    /// string and iterates [expect.len()] amount of times and compares the result
    /// against [lexer.next()].
    fn helper_lex_next_auto<T>(source: &str, expect: Vec<(Token, T)>)
    where
        T: Into<Region>,
    {
        let finder = Finder::new(Builder::new().to_syntax());
        let mut lexer = Lexer::new(source, &finder);
        for (token, region) in expect {
            assert_eq!(lexer.next(), Ok(Some((token, region.into()))))
        }

        assert_eq!(lexer.next(), Ok(None));
        assert_eq!(lexer.next(), Ok(None));
        assert_eq!(lexer.next(), Ok(None));
    }
}
