//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the token cursor, and the `class` entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one method per grammar rule:
//! - This module: Parser struct, cursor helpers, and the `class` rule
//! - `declarations`: class variables, subroutines, parameters, local variables
//! - `statements`: `let`, `if`, `while`, `do`, `return`
//! - `expressions`: expressions, terms, subroutine calls, expression lists
//!
//! The call stack of those methods is the parser's only state besides the
//! current token. The first error aborts the parse; there is no recovery.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared cursor.

use crate::parser::lexer::{Keyword, LexError, Lexer, Token};
use crate::parser::tree::{Node, NonTerminal, SourceLocation};
use std::fmt;
use thiserror::Error;

/// Deepest nesting of expressions, unary terms, and statement blocks
pub const MAX_NESTING_DEPTH: usize = 128;

/// What the parser found where it expected something else
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    Token(Token),
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(token) => write!(f, "{}", token),
            Found::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// The current token does not fit the grammar at the current position
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {location}: expected {expected}, found {found}")]
pub struct SyntaxError {
    pub expected: String,
    pub found: Found,
    pub location: SourceLocation,
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax(err) => err.location,
        }
    }
}

/// Recursive descent parser for Jack classes
pub struct Parser {
    pub(crate) lexer: Lexer,
    pub(crate) current: Option<Token>,
    pub(crate) lookahead: Option<Token>,
    pub(crate) depth: usize,
}

impl Parser {
    /// Create a parser over `source`, scanning the first token.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            lookahead: None,
            depth: 0,
        })
    }

    /// Parse one source unit: `'class' identifier '{' classVarDec* subroutineDec* '}'`
    ///
    /// Input left over after the closing brace is rejected.
    pub fn parse_class(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Class)?];
        children.push(self.expect_identifier("class name")?);
        children.push(self.expect_symbol('{')?);

        while self.check_any_keyword(&[Keyword::Static, Keyword::Field]) {
            children.push(self.parse_class_var_dec()?);
        }

        while self.check_any_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method]) {
            children.push(self.parse_subroutine_dec()?);
        }

        children.push(self.expect_symbol('}')?);

        if !self.is_at_end() {
            return Err(self.unexpected("end of input"));
        }

        Ok(Node::branch(NonTerminal::Class, children))
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    /// The token after the current one, scanned on first request.
    pub(crate) fn peek_second(&mut self) -> Result<Option<&Token>, ParseError> {
        if self.lookahead.is_none() && self.current.is_some() {
            self.lookahead = self.lexer.next_token()?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Consume the current token and move the cursor forward.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        let next = match self.lookahead.take() {
            Some(token) => Some(token),
            None => self.lexer.next_token()?,
        };
        match std::mem::replace(&mut self.current, next) {
            Some(token) => Ok(token),
            None => Err(self.unexpected("token")),
        }
    }

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING_DEPTH`].
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.unexpected(format!(
                "nesting depth of at most {}",
                MAX_NESTING_DEPTH
            )));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.current.is_none()
    }

    pub(crate) fn check_symbol(&self, symbol: char) -> bool {
        self.peek().is_some_and(|t| t.is_symbol(symbol))
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| t.is_keyword(keyword))
    }

    pub(crate) fn check_any_keyword(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|&k| self.check_keyword(k))
    }

    pub(crate) fn check_identifier(&self) -> bool {
        self.peek().is_some_and(Token::is_identifier)
    }

    /// Build a syntax error describing the current token.
    pub(crate) fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let (found, location) = match self.peek() {
            Some(token) => (Found::Token(token.clone()), token.location()),
            None => (Found::EndOfInput, self.lexer.current_location()),
        };
        ParseError::Syntax(SyntaxError {
            expected: expected.into(),
            found,
            location,
        })
    }

    pub(crate) fn expect_symbol(&mut self, symbol: char) -> Result<Node, ParseError> {
        if self.check_symbol(symbol) {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(self.unexpected(format!("'{}'", symbol)))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Node, ParseError> {
        if self.check_keyword(keyword) {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(self.unexpected(format!("'{}'", keyword)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, what: &str) -> Result<Node, ParseError> {
        if self.check_identifier() {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(self.unexpected(what))
        }
    }
}
