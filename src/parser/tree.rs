//! Concrete syntax tree produced by the parser
//!
//! Every [`Node`] is either a terminal (a [`Token`] echoed verbatim) or a
//! branch labeled with the [`NonTerminal`] whose production it matched.
//! The tree mirrors the grammar exactly: the parser rejects anything that does
//! not fit a production, so a branch's children always conform to it.

use super::lexer::Token;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Grammar rules that appear as labeled branches in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl NonTerminal {
    /// The element name used for this rule in the XML artifact.
    pub fn label(self) -> &'static str {
        match self {
            NonTerminal::Class => "class",
            NonTerminal::ClassVarDec => "classVarDec",
            NonTerminal::SubroutineDec => "subroutineDec",
            NonTerminal::ParameterList => "parameterList",
            NonTerminal::SubroutineBody => "subroutineBody",
            NonTerminal::VarDec => "varDec",
            NonTerminal::Statements => "statements",
            NonTerminal::LetStatement => "letStatement",
            NonTerminal::IfStatement => "ifStatement",
            NonTerminal::WhileStatement => "whileStatement",
            NonTerminal::DoStatement => "doStatement",
            NonTerminal::ReturnStatement => "returnStatement",
            NonTerminal::Expression => "expression",
            NonTerminal::Term => "term",
            NonTerminal::ExpressionList => "expressionList",
        }
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A node of the parse tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Terminal(Token),
    Branch {
        kind: NonTerminal,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn branch(kind: NonTerminal, children: Vec<Node>) -> Self {
        Node::Branch { kind, children }
    }

    /// Element name of this node: the token class for terminals, the rule
    /// name for branches.
    pub fn label(&self) -> &'static str {
        match self {
            Node::Terminal(token) => token.label(),
            Node::Branch { kind, .. } => kind.label(),
        }
    }

    /// Rule of a branch node, `None` for terminals.
    pub fn kind(&self) -> Option<NonTerminal> {
        match self {
            Node::Terminal(_) => None,
            Node::Branch { kind, .. } => Some(*kind),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Terminal(_) => &[],
            Node::Branch { children, .. } => children,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Terminal(token) => Some(token),
            Node::Branch { .. } => None,
        }
    }

    /// All terminal tokens below this node in document order.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Terminal(token) => out.push(token),
            Node::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Pre-order search for every branch of the given rule, including `self`.
    pub fn find_all(&self, kind: NonTerminal) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect_kind(kind, &mut found);
        found
    }

    fn collect_kind<'a>(&'a self, kind: NonTerminal, out: &mut Vec<&'a Node>) {
        if let Node::Branch {
            kind: own,
            children,
        } = self
        {
            if *own == kind {
                out.push(self);
            }
            for child in children {
                child.collect_kind(kind, out);
            }
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Terminal(token)
    }
}
