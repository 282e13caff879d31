//! Declaration parsing implementation
//!
//! This module handles the class-level and subroutine-level declarations:
//!
//! - Class variables: `static int count;`, `field Point a, b;`
//! - Subroutines: constructors, functions, and methods
//! - Parameter lists and subroutine bodies
//! - Local variables: `var Array a;`
//!
//! # Grammar
//!
//! ```text
//! classVarDec    ::= ('static'|'field') type identifier (',' identifier)* ';'
//! type           ::= 'int' | 'char' | 'boolean' | identifier
//! subroutineDec  ::= ('constructor'|'function'|'method') ('void'|type) identifier
//!                    '(' parameterList ')' subroutineBody
//! parameterList  ::= ( type identifier (',' type identifier)* )?
//! subroutineBody ::= '{' varDec* statements '}'
//! varDec         ::= 'var' type identifier (',' identifier)* ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::Keyword;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{Node, NonTerminal};

const TYPE_KEYWORDS: &[Keyword] = &[Keyword::Int, Keyword::Char, Keyword::Boolean];

impl Parser {
    /// Parse class variable declaration: ('static'|'field') type name (',' name)* ';'
    pub(crate) fn parse_class_var_dec(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        if self.check_any_keyword(&[Keyword::Static, Keyword::Field]) {
            children.push(Node::Terminal(self.advance()?));
        } else {
            return Err(self.unexpected("'static' or 'field'"));
        }

        self.parse_variable_names(&mut children)?;

        Ok(Node::branch(NonTerminal::ClassVarDec, children))
    }

    /// Parse subroutine declaration (constructor, function, or method)
    pub(crate) fn parse_subroutine_dec(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        if self.check_any_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method]) {
            children.push(Node::Terminal(self.advance()?));
        } else {
            return Err(self.unexpected("'constructor', 'function' or 'method'"));
        }

        if self.check_keyword(Keyword::Void) {
            children.push(Node::Terminal(self.advance()?));
        } else if self.is_type_start() {
            children.push(self.parse_type()?);
        } else {
            return Err(self.unexpected("'void' or type"));
        }

        children.push(self.expect_identifier("subroutine name")?);
        children.push(self.expect_symbol('(')?);
        children.push(self.parse_parameter_list()?);
        children.push(self.expect_symbol(')')?);
        children.push(self.parse_subroutine_body()?);

        Ok(Node::branch(NonTerminal::SubroutineDec, children))
    }

    /// Parse parameter list; empty when the next token cannot start a type
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        if self.is_type_start() {
            loop {
                children.push(self.parse_type()?);
                children.push(self.expect_identifier("parameter name")?);

                if !self.check_symbol(',') {
                    break;
                }
                children.push(Node::Terminal(self.advance()?));
            }
        }

        Ok(Node::branch(NonTerminal::ParameterList, children))
    }

    /// Parse subroutine body: '{' varDec* statements '}'
    pub(crate) fn parse_subroutine_body(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_symbol('{')?];

        while self.check_keyword(Keyword::Var) {
            children.push(self.parse_var_dec()?);
        }

        children.push(self.parse_statements()?);
        children.push(self.expect_symbol('}')?);

        Ok(Node::branch(NonTerminal::SubroutineBody, children))
    }

    /// Parse local variable declaration: 'var' type name (',' name)* ';'
    pub(crate) fn parse_var_dec(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Var)?];

        self.parse_variable_names(&mut children)?;

        Ok(Node::branch(NonTerminal::VarDec, children))
    }

    /// Shared tail of class and local variable declarations:
    /// type name (',' name)* ';'
    fn parse_variable_names(&mut self, children: &mut Vec<Node>) -> Result<(), ParseError> {
        children.push(self.parse_type()?);
        children.push(self.expect_identifier("variable name")?);

        while self.check_symbol(',') {
            children.push(Node::Terminal(self.advance()?));
            children.push(self.expect_identifier("variable name")?);
        }

        children.push(self.expect_symbol(';')?);
        Ok(())
    }

    /// Parse type: 'int' | 'char' | 'boolean' | class name
    pub(crate) fn parse_type(&mut self) -> Result<Node, ParseError> {
        if self.is_type_start() {
            Ok(Node::Terminal(self.advance()?))
        } else {
            Err(self.unexpected("type"))
        }
    }

    pub(crate) fn is_type_start(&self) -> bool {
        self.check_any_keyword(TYPE_KEYWORDS) || self.check_identifier()
    }
}
