//! Expression parsing implementation
//!
//! This module handles parsing of Jack expressions. The language has no
//! operator precedence: an expression is a flat chain of terms joined by
//! binary operators, and grouping needs explicit parentheses.
//!
//! # Grammar
//!
//! ```text
//! expression     ::= term (op term)*
//! op             ::= '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='
//! term           ::= integerConstant | stringConstant
//!                  | 'true' | 'false' | 'null' | 'this'
//!                  | identifier
//!                  | identifier '[' expression ']'
//!                  | subroutineCall
//!                  | '(' expression ')'
//!                  | unaryOp term
//! unaryOp        ::= '-' | '~'
//! subroutineCall ::= identifier ('.' identifier)? '(' expressionList ')'
//! expressionList ::= ( expression (',' expression)* )?
//! ```
//!
//! A term that starts with an identifier is the one place the parser looks a
//! second token ahead: `[` selects indexing, `(` or `.` a call, anything else
//! a plain variable.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{Node, NonTerminal};

/// Binary operators
pub const BINARY_OPS: &[char] = &['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Unary operators
pub const UNARY_OPS: &[char] = &['-', '~'];

const KEYWORD_CONSTANTS: &[Keyword] = &[Keyword::True, Keyword::False, Keyword::Null, Keyword::This];

impl Parser {
    /// Parse expression: term (op term)*
    pub(crate) fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.nested(|parser| {
            let mut children = vec![parser.parse_term()?];

            while parser.check_binary_op() {
                children.push(Node::Terminal(parser.advance()?));
                children.push(parser.parse_term()?);
            }

            Ok(Node::branch(NonTerminal::Expression, children))
        })
    }

    /// Parse a single term
    pub(crate) fn parse_term(&mut self) -> Result<Node, ParseError> {
        let kind = match self.peek() {
            Some(token) => token.kind().clone(),
            None => return Err(self.unexpected("term")),
        };

        let mut children = Vec::new();

        match kind {
            TokenKind::IntegerConstant(_) | TokenKind::StringConstant(_) => {
                children.push(Node::Terminal(self.advance()?));
            }
            TokenKind::Keyword(keyword) if KEYWORD_CONSTANTS.contains(&keyword) => {
                children.push(Node::Terminal(self.advance()?));
            }
            TokenKind::Identifier(_) => {
                if self.second_is_symbol('[')? {
                    children.push(Node::Terminal(self.advance()?));
                    children.push(Node::Terminal(self.advance()?));
                    children.push(self.parse_expression()?);
                    children.push(self.expect_symbol(']')?);
                } else if self.second_is_symbol('(')? || self.second_is_symbol('.')? {
                    children.push(Node::Terminal(self.advance()?));
                    self.parse_subroutine_call_suffix(&mut children)?;
                } else {
                    children.push(Node::Terminal(self.advance()?));
                }
            }
            TokenKind::Symbol('(') => {
                children.push(Node::Terminal(self.advance()?));
                children.push(self.parse_expression()?);
                children.push(self.expect_symbol(')')?);
            }
            TokenKind::Symbol(op) if UNARY_OPS.contains(&op) => {
                children.push(Node::Terminal(self.advance()?));
                children.push(self.nested(Self::parse_term)?);
            }
            _ => return Err(self.unexpected("term")),
        }

        Ok(Node::branch(NonTerminal::Term, children))
    }

    /// Parse the part of a subroutine call after its leading identifier:
    /// ('.' identifier)? '(' expressionList ')'
    pub(crate) fn parse_subroutine_call_suffix(
        &mut self,
        children: &mut Vec<Node>,
    ) -> Result<(), ParseError> {
        if self.check_symbol('.') {
            children.push(Node::Terminal(self.advance()?));
            children.push(self.expect_identifier("subroutine name")?);
        }

        children.push(self.expect_symbol('(')?);
        children.push(self.parse_expression_list()?);
        children.push(self.expect_symbol(')')?);
        Ok(())
    }

    /// Parse comma-separated arguments; empty when the next token is ')'
    pub(crate) fn parse_expression_list(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        if !self.check_symbol(')') {
            children.push(self.parse_expression()?);

            while self.check_symbol(',') {
                children.push(Node::Terminal(self.advance()?));
                children.push(self.parse_expression()?);
            }
        }

        Ok(Node::branch(NonTerminal::ExpressionList, children))
    }

    fn second_is_symbol(&mut self, symbol: char) -> Result<bool, ParseError> {
        Ok(self.peek_second()?.is_some_and(|t| t.is_symbol(symbol)))
    }

    fn check_binary_op(&self) -> bool {
        BINARY_OPS.iter().any(|&op| self.check_symbol(op))
    }
}
