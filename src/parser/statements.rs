//! Statement parsing implementation
//!
//! This module handles parsing of all Jack statement types:
//!
//! - Assignments: `let x = 42;`, `let a[i] = x;`
//! - Control flow: `if`/`else`, `while`
//! - Calls for effect: `do Output.printInt(1);`
//! - Returns: `return;`, `return x;`
//!
//! # Grammar
//!
//! ```text
//! statements      ::= statement*
//! statement       ::= letStatement | ifStatement | whileStatement
//!                   | doStatement | returnStatement
//! letStatement    ::= 'let' identifier ('[' expression ']')? '=' expression ';'
//! ifStatement     ::= 'if' '(' expression ')' '{' statements '}'
//!                     ('else' '{' statements '}')?
//! whileStatement  ::= 'while' '(' expression ')' '{' statements '}'
//! doStatement     ::= 'do' subroutineCall ';'
//! returnStatement ::= 'return' expression? ';'
//! ```
//!
//! Bodies of `if` and `while` always need braces; there is no single-statement form.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::lexer::Keyword;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tree::{Node, NonTerminal};

const STATEMENT_KEYWORDS: &[Keyword] = &[
    Keyword::Let,
    Keyword::If,
    Keyword::While,
    Keyword::Do,
    Keyword::Return,
];

impl Parser {
    /// Parse statements until a token that cannot start one
    pub(crate) fn parse_statements(&mut self) -> Result<Node, ParseError> {
        let mut children = Vec::new();

        while self.check_any_keyword(STATEMENT_KEYWORDS) {
            children.push(self.parse_statement()?);
        }

        Ok(Node::branch(NonTerminal::Statements, children))
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Node, ParseError> {
        if self.check_keyword(Keyword::Let) {
            return self.parse_let_statement();
        }

        if self.check_keyword(Keyword::If) {
            return self.parse_if_statement();
        }

        if self.check_keyword(Keyword::While) {
            return self.parse_while_statement();
        }

        if self.check_keyword(Keyword::Do) {
            return self.parse_do_statement();
        }

        if self.check_keyword(Keyword::Return) {
            return self.parse_return_statement();
        }

        Err(self.unexpected("statement"))
    }

    /// Parse let statement
    fn parse_let_statement(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Let)?];
        children.push(self.expect_identifier("variable name")?);

        if self.check_symbol('[') {
            children.push(Node::Terminal(self.advance()?));
            children.push(self.parse_expression()?);
            children.push(self.expect_symbol(']')?);
        }

        children.push(self.expect_symbol('=')?);
        children.push(self.parse_expression()?);
        children.push(self.expect_symbol(';')?);

        Ok(Node::branch(NonTerminal::LetStatement, children))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::If)?];
        self.parse_condition_and_block(&mut children)?;

        if self.check_keyword(Keyword::Else) {
            children.push(Node::Terminal(self.advance()?));
            self.parse_block(&mut children)?;
        }

        Ok(Node::branch(NonTerminal::IfStatement, children))
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::While)?];
        self.parse_condition_and_block(&mut children)?;

        Ok(Node::branch(NonTerminal::WhileStatement, children))
    }

    /// Parse do statement; the call's tokens sit directly under the statement
    fn parse_do_statement(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Do)?];
        children.push(self.expect_identifier("subroutine or object name")?);
        self.parse_subroutine_call_suffix(&mut children)?;
        children.push(self.expect_symbol(';')?);

        Ok(Node::branch(NonTerminal::DoStatement, children))
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Node, ParseError> {
        let mut children = vec![self.expect_keyword(Keyword::Return)?];

        if !self.check_symbol(';') {
            children.push(self.parse_expression()?);
        }

        children.push(self.expect_symbol(';')?);

        Ok(Node::branch(NonTerminal::ReturnStatement, children))
    }

    /// '(' expression ')' '{' statements '}'
    fn parse_condition_and_block(&mut self, children: &mut Vec<Node>) -> Result<(), ParseError> {
        children.push(self.expect_symbol('(')?);
        children.push(self.parse_expression()?);
        children.push(self.expect_symbol(')')?);
        self.parse_block(children)
    }

    /// '{' statements '}'
    fn parse_block(&mut self, children: &mut Vec<Node>) -> Result<(), ParseError> {
        children.push(self.expect_symbol('{')?);
        children.push(self.nested(Self::parse_statements)?);
        children.push(self.expect_symbol('}')?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse::{Found, ParseError, Parser, SyntaxError};
    use crate::parser::tree::{Node, NonTerminal};

    fn parse_body(statements: &str) -> Result<Node, ParseError> {
        let source = format!("class T {{ function void f() {{ {} }} }}", statements);
        Parser::new(&source)?.parse_class()
    }

    fn statements(tree: &Node) -> &[Node] {
        tree.find_all(NonTerminal::Statements)[0].children()
    }

    fn texts(node: &Node) -> Vec<String> {
        node.leaves().iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_let_with_index() {
        let tree = parse_body("let a[i + 1] = x;").unwrap();
        let stmt = &statements(&tree)[0];

        assert_eq!(stmt.kind(), Some(NonTerminal::LetStatement));
        let labels: Vec<&str> = stmt.children().iter().map(Node::label).collect();
        assert_eq!(
            labels,
            vec!["keyword", "identifier", "symbol", "expression", "symbol", "symbol", "expression", "symbol"]
        );
    }

    #[test]
    fn test_if_else() {
        let tree = parse_body("if (x) { let y = 1; } else { let y = 2; let z = 3; }").unwrap();
        let stmt = &statements(&tree)[0];

        assert_eq!(stmt.kind(), Some(NonTerminal::IfStatement));
        let inner = stmt.find_all(NonTerminal::Statements);
        assert_eq!(inner.len(), 2);
        assert_eq!(inner[0].children().len(), 1);
        assert_eq!(inner[1].children().len(), 2);
        assert_eq!(stmt.children()[7].label(), "keyword");
    }

    #[test]
    fn test_empty_blocks_emit_empty_statements() {
        let tree = parse_body("while (true) { }").unwrap();
        let stmt = &statements(&tree)[0];

        assert_eq!(texts(stmt), vec!["while", "(", "true", ")", "{", "}"]);
        assert!(stmt.children()[5].children().is_empty());
    }

    #[test]
    fn test_do_call_is_inline() {
        let tree = parse_body("do Output.printInt(1 + 2);").unwrap();
        let stmt = &statements(&tree)[0];
        let labels: Vec<&str> = stmt.children().iter().map(Node::label).collect();

        assert_eq!(
            labels,
            vec!["keyword", "identifier", "symbol", "identifier", "symbol", "expressionList", "symbol", "symbol"]
        );

        let list = &stmt.children()[5];
        assert_eq!(list.children().len(), 1);
        let expr = &list.children()[0];
        let expr_labels: Vec<&str> = expr.children().iter().map(Node::label).collect();
        assert_eq!(expr_labels, vec!["term", "symbol", "term"]);
        assert_eq!(expr.children()[1].token().unwrap().text(), "+");
    }

    #[test]
    fn test_do_local_call() {
        let tree = parse_body("do draw();").unwrap();
        assert_eq!(texts(&statements(&tree)[0]), vec!["do", "draw", "(", ")", ";"]);
    }

    #[test]
    fn test_return_with_and_without_value() {
        let tree = parse_body("return; return this;").unwrap();
        let stmts = statements(&tree);

        assert_eq!(stmts[0].children().len(), 2);
        assert_eq!(stmts[1].children().len(), 3);
        assert_eq!(stmts[1].children()[1].kind(), Some(NonTerminal::Expression));
    }

    #[test]
    fn test_unclosed_if_body() {
        let err = Parser::new("class Main { function void main() { if (x) { }")
            .unwrap()
            .parse_class()
            .unwrap_err();

        match err {
            ParseError::Syntax(SyntaxError {
                expected, found, ..
            }) => {
                assert_eq!(expected, "'}'");
                assert_eq!(found, Found::EndOfInput);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_do_requires_a_call() {
        let err = parse_body("do x;").unwrap_err();
        assert!(err.to_string().contains("expected '(', found symbol ';'"));
    }

    #[test]
    fn test_if_requires_braces() {
        let err = parse_body("if (x) let y = 1;").unwrap_err();
        assert!(err.to_string().contains("expected '{', found keyword 'let'"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse_body("let x = 1 let y = 2;").unwrap_err();
        assert!(err.to_string().contains("expected ';', found keyword 'let'"));
    }

    #[test]
    fn test_deep_blocks_fail_cleanly() {
        let body = format!("{}{}", "while (x) { ".repeat(5000), "}".repeat(5000));
        let err = parse_body(&body).unwrap_err();
        assert!(err
            .to_string()
            .contains("expected nesting depth of at most 128, found identifier 'x'"));
    }

    #[test]
    fn test_parse_statement_rejects_non_statement() {
        let mut parser = Parser::new("var").unwrap();
        let err = parser.parse_statement().unwrap_err();
        assert!(err.to_string().contains("expected statement, found keyword 'var'"));
    }
}
