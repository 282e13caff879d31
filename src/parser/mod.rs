//! Jack source code parser
//!
//! This module transforms Jack source text into a concrete syntax tree:
//! - [`lexer`]: Tokenization (source text → tokens, on demand)
//! - [`parse`]: Parser struct, cursor, errors, and the `class` entry point
//! - [`tree`]: Parse tree node definitions
//!
//! # Grammar Coverage
//!
//! The full Jack grammar: class variable and subroutine declarations,
//! parameter lists, local variables, all five statement forms, and
//! expressions with calls, indexing, and unary operators.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per grammar rule,
//! needing a single token of lookahead except for terms that begin with an
//! identifier. No external parser generator dependencies.

pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
pub mod tree;

pub use lexer::{Keyword, LexError, Lexer, Token, TokenKind};
pub use parse::{Found, ParseError, Parser, SyntaxError};
pub use tree::{Node, NonTerminal, SourceLocation};

/// Parse one complete source unit into its `class` tree.
pub fn parse_source(source: &str) -> Result<Node, ParseError> {
    Parser::new(source)?.parse_class()
}
