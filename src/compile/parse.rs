//! Constructs a Template from a stream of Token instances.
//!
//! Receives tokens from a Lexer and assembles them into a new Template
//! containing the Abstract Syntax Tree, which can later be combined with
//! some Store data to produce output.
pub mod scope;
pub mod tree;

mod state;

use self::{
    scope::Scope,
    state::BlockState,
    tree::{Block, Extends, Identifier, Tree},
};
use crate::{
    compile::{
        lex::{token::Token, LexResult, LexResultMust, Lexer},
        template::Template,
        Keyword,
    },
    log::{error_eof, expected_keyword, Error, UNEXPECTED_EOF, UNEXPECTED_TAG, UNEXPECTED_TOKEN},
    region::Region,
    resolve::Resolver,
};
use morel::Finder;
use std::sync::Arc;

pub struct Parser<'source> {
    /// Lexer used to pull from source as tokens instead of raw text.
    lexer: Lexer<'source>,
    /// Store peeked tokens.
    ///
    /// Double option is used to remember when the next token is None.
    buffer: Option<Option<(Token, Region)>>,
    /// Capability used to load parent templates.
    ///
    /// Never invoked during compilation, but retained by any Extends
    /// nodes this Parser builds.
    resolver: Arc<dyn Resolver>,
}

impl<'source> Parser<'source> {
    /// Create a new Parser from the given source, [`Finder`] and [`Resolver`].
    #[inline]
    pub fn new(
        source: &'source str,
        finder: &'source Finder,
        resolver: Arc<dyn Resolver>,
    ) -> Self {
        Self {
            lexer: Lexer::new(source, finder),
            buffer: None,
            resolver,
        }
    }

    /// Compile the template.
    ///
    /// Returns a new Template, which can be executed with some Store
    /// data to receive output.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the source contains invalid syntax, such
    /// as a `block` tag without a matching `endblock`.
    pub fn compile(mut self, name: Option<&str>) -> Result<Template, Error> {
        // Temporary storage for `block` tags that are not yet closed.
        let mut states: Vec<BlockState> = vec![];

        // Contains the distinct Tree instances within a specific area of
        // the source.
        //
        // A new Scope is pushed when a block opens, and popped into the
        // finished Block when the matching endblock arrives.
        let mut scopes: Vec<Scope> = vec![Scope::new()];

        while let Some(next) = self.next()? {
            match next {
                (Token::Raw, region) => {
                    let text = region.literal(self.lexer.source);
                    // Trim markers may leave an empty region behind.
                    if !text.is_empty() {
                        scopes
                            .last_mut()
                            .unwrap()
                            .data
                            .push(Tree::Raw(text.to_owned()));
                    }
                }
                (Token::BeginExpression, _) => {
                    let (name, _) = self.parse_path()?;
                    self.next_must(Token::EndExpression)?;

                    scopes
                        .last_mut()
                        .unwrap()
                        .data
                        .push(Tree::Output(Identifier { name }));
                }
                (Token::BeginTag, region) => match self.parse_keyword()? {
                    (Keyword::Block, _) => {
                        let (name, _) = self.parse_path()?;
                        let (_, end) = self.next_must(Token::EndTag)?;

                        states.push(BlockState::Block {
                            name,
                            region: region.combine(end),
                        });
                        scopes.push(Scope::new());
                    }
                    (Keyword::EndBlock, keyword) => match states.pop() {
                        Some(BlockState::Block { name, .. }) => {
                            self.next_must(Token::EndTag)?;

                            let scope = scopes.pop().unwrap();
                            scopes
                                .last_mut()
                                .unwrap()
                                .data
                                .push(Tree::Block(Block::new(name, scope)));
                        }
                        None => {
                            return Err(Error::build(UNEXPECTED_TAG)
                                .with_pointer(self.lexer.source, keyword)
                                .with_help(
                                    "`endblock` must be preceded by a matching `block` tag",
                                ))
                        }
                    },
                    (Keyword::Extends, _) => {
                        let name = self.parse_name()?;
                        self.next_must(Token::EndTag)?;

                        scopes
                            .last_mut()
                            .unwrap()
                            .data
                            .push(Tree::Extends(Extends::shared(name, self.resolver.clone())));
                    }
                },
                (token, region) => {
                    return Err(Error::build(UNEXPECTED_TOKEN)
                        .with_pointer(self.lexer.source, region)
                        .with_help(format!(
                            "expected raw text, expression, or tag, found `{token}`"
                        )))
                }
            }
        }

        if let Some(BlockState::Block { name, region }) = states.first() {
            return Err(Error::build(UNEXPECTED_EOF)
                .with_pointer(self.lexer.source, *region)
                .with_help(format!(
                    "did you close the `{name}` block with an `endblock` tag?"
                )));
        }

        assert!(
            scopes.len() == 1,
            "parser should never have >1 scope after compilation"
        );

        Ok(Template::new(scopes.remove(0), name.map(str::to_owned)))
    }

    /// Parse a dotted path into a single flat name.
    ///
    /// The segments on either side of a period must be adjacent:
    ///
    /// one.two <- valid
    ///
    /// one . two <- invalid
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the next token is not an identifier, or
    /// when a period appears separated from its segments.
    fn parse_path(&mut self) -> Result<(String, Region), Error> {
        let (_, mut region) = self.next_must(Token::Identifier)?;

        while self.next_is(Token::Period)? {
            let (_, period) = self.next_must(Token::Period)?;
            if !region.is_neighbor(period) {
                return Err(Error::build(UNEXPECTED_TOKEN)
                    .with_pointer(self.lexer.source, period)
                    .with_help("remove the whitespace before this period"));
            }

            let (_, next) = self.next_must(Token::Identifier)?;
            if !period.is_neighbor(next) {
                return Err(Error::build(UNEXPECTED_TOKEN)
                    .with_pointer(self.lexer.source, next)
                    .with_help("remove the whitespace after the period"));
            }

            region = region.combine(next);
        }

        Ok((self.lexer.source[region].to_owned(), region))
    }

    /// Parse the name of a parent template.
    ///
    /// The name may be a path such as `base.html`, or a quoted string
    /// when it contains characters a path does not allow.
    fn parse_name(&mut self) -> Result<String, Error> {
        if self.next_is(Token::String)? {
            let (_, region) = self.next_must(Token::String)?;

            return self.parse_string(region);
        }

        Ok(self.parse_path()?.0)
    }

    /// Parse a String from the literal value of the given Region.
    ///
    /// The surrounding double quotes are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if an unrecognized escape character is found.
    fn parse_string(&self, region: Region) -> Result<String, Error> {
        let window = region.literal(self.lexer.source);

        let string = if window.contains('\\') {
            let mut iter = window.chars();
            let mut string = String::new();

            while let Some(c) = iter.next() {
                match c {
                    '"' => continue,
                    '\\' => {
                        // The lexer guarantees a character follows the escape.
                        let c = match iter.next().unwrap() {
                            'n' => '\n',
                            'r' => '\r',
                            't' => '\t',
                            '\\' => '\\',
                            '"' => '"',
                            _ => {
                                return Err(Error::build("unexpected escape character")
                                    .with_pointer(self.lexer.source, region))
                            }
                        };
                        string.push(c);
                    }
                    c => string.push(c),
                }
            }
            string
        } else {
            window[1..window.len() - 1].to_owned()
        };

        Ok(string)
    }

    /// Parse a Keyword.
    ///
    /// # Errors
    ///
    /// Returns an error if the next token is not a Keyword.
    fn parse_keyword(&mut self) -> Result<(Keyword, Region), Error> {
        match self.next_any_must()? {
            (Token::Keyword(keyword), region) => Ok((keyword, region)),
            (token, region) => Err(Error::build(UNEXPECTED_TOKEN)
                .with_pointer(self.lexer.source, region)
                .with_help(expected_keyword(token))),
        }
    }

    /// Peek the next token.
    ///
    /// # Errors
    ///
    /// Propagates any error reported by the underlying Lexer.
    fn peek(&mut self) -> LexResult {
        if let o @ None = &mut self.buffer {
            *o = Some(self.lexer.next()?);
        }

        Ok(self.buffer.unwrap())
    }

    /// Get the next token.
    ///
    /// Prefers to pull a token from the internal buffer first, but will pull from
    /// the lexer when the buffer is empty.
    fn next(&mut self) -> LexResult {
        match self.buffer.take() {
            Some(t) => Ok(t),
            None => self.lexer.next(),
        }
    }

    /// Returns true if the given token matches the upcoming token.
    ///
    /// # Errors
    ///
    /// Propagates any errors reported by the underlying lexer.
    fn next_is(&mut self, expect: Token) -> Result<bool, Error> {
        Ok(self
            .peek()?
            .map(|(token, _)| token == expect)
            .unwrap_or(false))
    }

    /// Get the next token, and compare it to the given token.
    ///
    /// # Errors
    ///
    /// An error is returned if the next token does not match the given token,
    /// or when no more tokens are left.
    fn next_must(&mut self, expect: Token) -> LexResultMust {
        match self.next()? {
            Some((token, region)) => {
                if token == expect {
                    Ok((token, region))
                } else {
                    Err(Error::build(UNEXPECTED_TOKEN)
                        .with_pointer(self.lexer.source, region)
                        .with_help(format!("expected `{expect}`")))
                }
            }
            None => Err(error_eof(self.lexer.source).with_help(format!("expected `{expect}`"))),
        }
    }

    /// Get the next token.
    ///
    /// Similar to `next`, but requires that a token is returned.
    ///
    /// # Errors
    ///
    /// An error is returned if no more tokens are left.
    fn next_any_must(&mut self) -> LexResultMust {
        match self.next()? {
            Some((token, region)) => Ok((token, region)),
            None => Err(error_eof(self.lexer.source)),
        }
    }
}
